pub mod analyzer;
pub mod config;
pub mod report;
pub mod rules;
pub mod signals;
pub mod source;
pub mod util;

use std::path::Path;

use anyhow::Result;

use crate::analyzer::{LogSink, ReportSink, ScanMode, ScanStatus};
use crate::config::Thresholds;
use crate::report::model::{Report, ScanInfo, SourceInfo, ToolInfo};
use crate::rules::classify::classify;
use crate::source::AssetSource;
use crate::source::read::read_manifest;

pub const TOOL_NAME: &str = "assetlint";

/// JSON schema version of lint reports.
/// Bump only when the report layout changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Lint a manifest file.
///
/// Fails only if the manifest cannot be read or parsed; scans themselves
/// always produce a report.
pub fn lint(path: &Path, mode: ScanMode, thresholds: &Thresholds, tool: ToolInfo) -> Result<Report> {
    let ctx = read_manifest(path)?;
    Ok(lint_source(
        &ctx.manifest,
        ctx.source_info(),
        mode,
        thresholds,
        tool,
        &mut LogSink,
    ))
}

/// Scan any asset source and assemble the report.
pub fn lint_source<S: AssetSource + ?Sized>(
    source: &S,
    source_info: SourceInfo,
    mode: ScanMode,
    thresholds: &Thresholds,
    tool: ToolInfo,
    sink: &mut dyn ReportSink,
) -> Report {
    let outcome = analyzer::scan(source, mode, thresholds, sink);

    let scan = match outcome.status {
        ScanStatus::EmptyScene => ScanInfo::empty_scene(*thresholds),
        ScanStatus::Ok => ScanInfo::ok(mode, *thresholds),
    };

    let classification = classify(&outcome.issues);
    Report::new(tool, source_info, scan, outcome.issues, classification)
}
