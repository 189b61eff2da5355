use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::analyzer::ScanMode;
use crate::config::Thresholds;
use crate::rules::catalog::{Category, RuleId, Severity};

/// One optimization finding.
///
/// Created by a rule, never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub rule_id: RuleId,
    /// Human-readable label naming the offending asset.
    pub title: String,
    /// Measured value, threshold, and excess ratio where applicable.
    pub description: String,
    pub category: Category,
    pub severity: Severity,
    /// Estimated benefit of fixing the issue, in `[0, 100]`.
    pub impact: f64,
    /// Offending asset, or `<project>` for project-wide findings.
    pub asset_path: String,
    pub suggested_fix: String,
}

/// Top-level lint report.
///
/// Deterministic for identical manifests and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub source: SourceInfo,
    pub scan: ScanInfo,
    pub summary: Summary,
    pub classification: ClassificationInfo,
    /// Sorted by severity, then impact, both descending.
    pub issues: Vec<Issue>,
}

impl Report {
    /// Assemble a report from a finished scan.
    ///
    /// Assumes `issues` are already sorted.
    pub fn new(
        tool: ToolInfo,
        source: SourceInfo,
        scan: ScanInfo,
        issues: Vec<Issue>,
        classification: ClassificationInfo,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            source,
            scan,
            summary: Summary::from_issues(&issues),
            classification,
            issues,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// Catalogue the report was produced from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub hash: SourceHash,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceHash {
    pub algorithm: String,
    pub value: String,
}

/// How the scan ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInfo {
    pub mode: ScanMode,
    pub thresholds: Thresholds,
    pub status: String,
    pub warnings: Vec<String>,
}

impl ScanInfo {
    pub fn ok(mode: ScanMode, thresholds: Thresholds) -> Self {
        Self {
            mode,
            thresholds,
            status: "ok".into(),
            warnings: vec![],
        }
    }

    pub fn empty_scene(thresholds: Thresholds) -> Self {
        Self {
            mode: ScanMode::Scene,
            thresholds,
            status: "empty_scene".into(),
            warnings: vec!["no active scene".into()],
        }
    }
}

/// Issue counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    /// Only categories with at least one issue appear.
    pub by_category: BTreeMap<Category, usize>,
}

impl Summary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Summary {
            total: issues.len(),
            ..Default::default()
        };
        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
            *summary.by_category.entry(issue.category).or_insert(0) += 1;
        }
        summary
    }
}

/// Overall verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationLevel {
    Clean,
    Warning,
    Critical,
}

impl ClassificationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationLevel::Clean => "CLEAN",
            ClassificationLevel::Warning => "WARNING",
            ClassificationLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationInfo {
    pub level: ClassificationLevel,
    pub reason: String,
    pub highest_severity: Option<Severity>,
    /// Distinct rules with at least one issue, in catalogue order.
    pub triggered_rule_ids: Vec<RuleId>,
    pub exit_code: i32,
}

impl ClassificationInfo {
    pub fn clean() -> Self {
        Self {
            level: ClassificationLevel::Clean,
            reason: "no issues found".into(),
            highest_severity: None,
            triggered_rule_ids: vec![],
            exit_code: 0,
        }
    }
}

/// Downstream projection over a sorted issue list.
///
/// Keeps order; never re-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Keep issues at or above this severity.
    pub min_severity: Option<Severity>,
    pub category: Option<Category>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        self.min_severity.is_none_or(|min| issue.severity >= min)
            && self.category.is_none_or(|c| issue.category == c)
    }

    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        issues.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}
