//! Deterministic ordering helpers.
//!
//! Report order is part of the output contract: identical inputs must
//! always produce identical reports.

use std::cmp::Ordering;

use crate::report::model::Issue;

/// Report ordering: severity descending, then impact descending.
///
/// Ties compare equal so that a stable sort preserves emission order.
pub fn issue_order(a: &Issue, b: &Issue) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| b.impact.total_cmp(&a.impact))
}

/// Sort issues for presentation. Stable.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(issue_order);
}

/// Key that makes an issue list independent of emission order.
///
/// Used to canonicalise ties when comparing reports built from differently
/// ordered sources.
pub fn canonical_order(a: &Issue, b: &Issue) -> Ordering {
    issue_order(a, b)
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then_with(|| a.asset_path.cmp(&b.asset_path))
}
