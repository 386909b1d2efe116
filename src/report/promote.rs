use crate::api::{experiment::Experiment, results::ExperimentResults};

/// One variant as shown in the promotion dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleVariant {
    pub id: String,
    pub name: String,
    /// Whether the experiment's traffic configuration already flags this
    /// variant as promoted.
    pub is_promoted: bool,
    /// Session-share percentage, 0-100.
    pub variant_percentage: f64,
    pub is_winner: bool,
    /// Probability-to-win from the statistical outcome, when it lists this
    /// variant.
    pub probability_to_win: Option<f64>,
}

/// Project the promotion-eligibility list for the primary goal's variants.
pub fn eligible_variants(
    experiment: &Experiment,
    results: &ExperimentResults,
) -> Vec<EligibleVariant> {
    results
        .goals
        .primary
        .variants
        .values()
        .map(|variant| EligibleVariant {
            id: variant.variant_name.clone(),
            name: variant.variant_description.clone(),
            is_promoted: experiment
                .traffic_proportion
                .variants
                .iter()
                .find(|configured| configured.id.as_ref() == variant.variant_name)
                .map(|configured| configured.promoted)
                .unwrap_or(false),
            variant_percentage: variant.unique_by_session.variant_percentage,
            is_winner: results.bayesian_result.suggested_winner.variant()
                == Some(variant.variant_name.as_str()),
            probability_to_win: results
                .bayesian_result
                .probabilities
                .iter()
                .find(|probability| probability.variant == variant.variant_name)
                .map(|probability| probability.value),
        })
        .collect()
}
