use crate::api::results::{ExperimentResults, DEFAULT_VARIANT_ID};

/// One table row per variant in the primary goal's breakdown.
///
/// Ratios (`best_variant`, `improvement`) are 0-1 fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub id: String,
    pub name: String,
    /// Not computed by any upstream signal yet, so always `None`.
    pub traffic_split: Option<f64>,
    pub page_views: u64,
    pub sessions: u64,
    pub clicks: u64,
    pub best_variant: f64,
    pub improvement: f64,
    pub is_winner: bool,
}

/// Derive the per-variant detail rows.
///
/// When the baseline variant is missing from the breakdown the improvement
/// fraction defaults to 0 instead of failing.
pub fn detail_rows(results: &ExperimentResults) -> Vec<DetailRow> {
    let baseline_percentage = results
        .goals
        .primary
        .variants
        .get(DEFAULT_VARIANT_ID)
        .map(|baseline| baseline.unique_by_session.total_percentage);

    results
        .goals
        .primary
        .variants
        .values()
        .map(|variant| DetailRow {
            id: variant.variant_name.clone(),
            name: variant.variant_description.clone(),
            traffic_split: None,
            page_views: variant.total_page_views,
            sessions: results
                .sessions
                .variants
                .get(&variant.variant_name)
                .copied()
                .unwrap_or(0),
            clicks: variant.unique_by_session.count,
            best_variant: variant.unique_by_session.total_percentage / 100.0,
            improvement: baseline_percentage
                .map(|baseline| (variant.unique_by_session.total_percentage - baseline) / 100.0)
                .unwrap_or(0.0),
            is_winner: results.bayesian_result.suggested_winner.variant()
                == Some(variant.variant_name.as_str()),
        })
        .collect()
}
