//! Shared builders for report tests.

use crate::api::{
    experiment::{Experiment, ExperimentStatus, TrafficProportion, Variant},
    results::{
        BayesianProbability, BayesianResult, DailyResult, ExperimentResults, GoalResult,
        GoalResults, Sessions, SuggestedWinner, UniqueBySession, VariantResults,
        DEFAULT_VARIANT_ID,
    },
};
use std::collections::BTreeMap;

pub enum Outcome {
    Tie,
    None,
    Winner(&'static str),
}

impl Outcome {
    fn suggested(&self) -> SuggestedWinner {
        match self {
            Outcome::Tie => SuggestedWinner::Tie,
            Outcome::None => SuggestedWinner::None,
            Outcome::Winner(id) => SuggestedWinner::Variant(id.to_string()),
        }
    }
}

pub fn variant_results(
    name: &str,
    description: &str,
    total_percentage: f64,
    days: &[(&str, u64)],
) -> VariantResults {
    VariantResults {
        variant_name: name.to_string(),
        variant_description: description.to_string(),
        total_page_views: 1200,
        unique_by_session: UniqueBySession {
            count: 120,
            total_percentage,
            variant_percentage: 50.0,
        },
        details: days
            .iter()
            .map(|(date, unique)| {
                (
                    date.to_string(),
                    DailyResult {
                        unique_by_session: *unique,
                        multi_by_session: unique + 10,
                    },
                )
            })
            .collect(),
    }
}

/// Results with a baseline at 20% and a challenger "variant-b" at 35%,
/// two days of detail each.
pub fn results_with(total_sessions: u64, outcome: Outcome) -> ExperimentResults {
    let mut variants = BTreeMap::new();
    variants.insert(
        DEFAULT_VARIANT_ID.to_string(),
        variant_results(
            DEFAULT_VARIANT_ID,
            "Original",
            20.0,
            &[("2023-04-01", 60), ("2023-04-02", 65)],
        ),
    );
    variants.insert(
        "variant-b".to_string(),
        variant_results(
            "variant-b",
            "Variant B",
            35.0,
            &[("2023-04-01", 70), ("2023-04-02", 75)],
        ),
    );

    let mut sessions = BTreeMap::new();
    sessions.insert(DEFAULT_VARIANT_ID.to_string(), total_sessions / 2);
    sessions.insert("variant-b".to_string(), total_sessions - total_sessions / 2);

    ExperimentResults {
        sessions: Sessions {
            total: total_sessions,
            variants: sessions,
        },
        goals: GoalResults {
            primary: GoalResult { variants },
        },
        bayesian_result: BayesianResult {
            suggested_winner: outcome.suggested(),
            probabilities: vec![
                BayesianProbability {
                    variant: DEFAULT_VARIANT_ID.to_string(),
                    value: 0.08,
                },
                BayesianProbability {
                    variant: "variant-b".to_string(),
                    value: 0.92,
                },
            ],
        },
    }
}

pub fn experiment(status: ExperimentStatus) -> Experiment {
    Experiment {
        id: "exp-1".into(),
        name: "Hero banner copy".to_string(),
        status,
        traffic_allocation: 100.0,
        traffic_proportion: TrafficProportion {
            variants: vec![
                Variant {
                    id: DEFAULT_VARIANT_ID.into(),
                    name: "Original".to_string(),
                    weight: 50.0,
                    url: None,
                    promoted: true,
                },
                Variant {
                    id: "variant-b".into(),
                    name: "Variant B".to_string(),
                    weight: 50.0,
                    url: Some("/hero-b".to_string()),
                    promoted: false,
                },
            ],
        },
        scheduling: None,
        goals: None,
    }
}
