//! Gap detection over a specificity breakdown.

use strata_core::entities::SpecificityBreakdown;
use strata_core::enums::Criterion;

/// Criteria whose sub-score is strictly below `threshold`, in rubric order.
#[must_use]
pub fn detect_gaps(breakdown: &SpecificityBreakdown, threshold: f64) -> Vec<Criterion> {
    breakdown
        .iter()
        .filter(|(_, score)| *score < threshold)
        .map(|(criterion, _)| criterion)
        .collect()
}
