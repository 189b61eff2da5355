//! Overall classification of a lint run.
//!
//! Derives a single verdict from the issues of a scan:
//!
//!   - Any critical issue  → CRITICAL
//!   - Else any warning    → WARNING
//!   - Else                → CLEAN
//!
//! Informational issues never fail a run. The policy does not depend on
//! issue order.

use std::collections::BTreeSet;

use crate::report::model::{ClassificationInfo, ClassificationLevel, Issue};
use crate::rules::catalog::Severity;

/// Classifies a finished scan.
///
/// Exit code mapping:
/// - CLEAN    → 0
/// - WARNING  → 1
/// - CRITICAL → 2
pub fn classify(issues: &[Issue]) -> ClassificationInfo {
    if issues.is_empty() {
        return ClassificationInfo::clean();
    }

    let highest = issues.iter().map(|i| i.severity).max();

    let level = match highest {
        Some(Severity::Critical) => ClassificationLevel::Critical,
        Some(Severity::Warning) => ClassificationLevel::Warning,
        _ => ClassificationLevel::Clean,
    };

    let exit_code = match level {
        ClassificationLevel::Clean => 0,
        ClassificationLevel::Warning => 1,
        ClassificationLevel::Critical => 2,
    };

    let triggered_rule_ids: BTreeSet<_> = issues.iter().map(|i| i.rule_id).collect();

    ClassificationInfo {
        level,
        reason: format!("{} issue(s) found", issues.len()),
        highest_severity: highest,
        triggered_rule_ids: triggered_rule_ids.into_iter().collect(),
        exit_code,
    }
}
