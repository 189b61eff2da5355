use anyhow::Result;

use crate::TOOL_NAME;
use crate::report::model::{Issue, Report};
use crate::rules::catalog::Severity;

/// CSV column order.
pub const CSV_HEADER: [&str; 7] = [
    "severity",
    "category",
    "title",
    "description",
    "impact",
    "asset_path",
    "suggested_fix",
];

fn badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRITICAL",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    }
}

pub fn render_text(report: &Report, issues: &[Issue]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    if let Some(path) = &report.source.path {
        out.push_str(&format!("Manifest: {path}\n"));
    }
    out.push_str(&format!("Mode: {:?}\n", report.scan.mode));
    for warning in &report.scan.warnings {
        out.push_str(&format!("Warning: {warning}\n"));
    }
    out.push_str(&format!(
        "Classification: {}\n",
        report.classification.level
    ));
    out.push_str(&format!(
        "Issues: {} ({} critical, {} warning, {} info)\n",
        report.summary.total, report.summary.critical, report.summary.warning, report.summary.info
    ));
    for issue in issues {
        out.push('\n');
        out.push_str(&format!(
            "[{}] {} (Impact: {:.0}%)\n",
            badge(issue.severity),
            issue.title,
            issue.impact
        ));
        out.push_str(&format!("    {}\n", issue.description));
        out.push_str(&format!("    Fix: {}\n", issue.suggested_fix));
        out.push_str(&format!("    Asset: {}\n", issue.asset_path));
    }
    out
}

/// Commas would split a field and line breaks a record; the export format
/// does not quote.
fn csv_field(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace(',', ";")
}

/// Writes issues as CSV: one header line, one record per issue.
pub fn render_csv(issues: &[Issue]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for issue in issues {
        wtr.write_record([
            issue.severity.to_string(),
            issue.category.to_string(),
            csv_field(&issue.title),
            csv_field(&issue.description),
            format!("{:.1}", issue.impact),
            csv_field(&issue.asset_path),
            csv_field(&issue.suggested_fix),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| anyhow::anyhow!("{}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
