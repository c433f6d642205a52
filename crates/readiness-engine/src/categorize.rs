//! Grouping of findings by category and level.

use readiness_core::types::{CategorizedFindings, Finding};

/// Bucket findings by category, then by level, keeping input order within
/// each bucket. Blockers are also collected into a category-agnostic list.
pub fn categorize(findings: Vec<Finding>) -> CategorizedFindings {
    let mut out = CategorizedFindings::default();
    for finding in findings {
        if finding.is_blocker() {
            out.blockers.push(finding.clone());
        }
        out.categories
            .entry(finding.category.clone())
            .or_default()
            .bucket_mut(finding.level)
            .push(finding);
    }
    out
}
