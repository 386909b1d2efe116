use serde::Deserialize;
use std::collections::BTreeMap;

/// Reserved id of the baseline/control variant.
///
/// Improvement percentages for every other variant are computed against it.
pub const DEFAULT_VARIANT_ID: &str = "DEFAULT";

/// Statistical results snapshot for one experiment.
///
/// Immutable once fetched; the store replaces it wholesale on reload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentResults {
    pub sessions: Sessions,
    pub goals: GoalResults,
    pub bayesian_result: BayesianResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sessions {
    pub total: u64,
    #[serde(default)]
    pub variants: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalResults {
    pub primary: GoalResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalResult {
    pub variants: BTreeMap<String, VariantResults>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResults {
    pub variant_name: String,
    pub variant_description: String,
    #[serde(default)]
    pub total_page_views: u64,
    pub unique_by_session: UniqueBySession,
    /// Per-day breakdown keyed by ISO date (`YYYY-MM-DD`).
    #[serde(default)]
    pub details: BTreeMap<String, DailyResult>,
}

/// Goal performance counted once per session. Percentages are 0-100.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueBySession {
    pub count: u64,
    pub total_percentage: f64,
    pub variant_percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    #[serde(default)]
    pub unique_by_session: u64,
    #[serde(default)]
    pub multi_by_session: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BayesianResult {
    pub suggested_winner: SuggestedWinner,
    #[serde(default)]
    pub probabilities: Vec<BayesianProbability>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BayesianProbability {
    pub variant: String,
    pub value: f64,
}

/// The statistical engine's verdict.
///
/// On the wire this is the winning variant's id, or one of the sentinels
/// `"TIE"` and `"NONE"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SuggestedWinner {
    Tie,
    None,
    Variant(String),
}

impl From<String> for SuggestedWinner {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TIE" => SuggestedWinner::Tie,
            "NONE" => SuggestedWinner::None,
            _ => SuggestedWinner::Variant(value),
        }
    }
}

impl SuggestedWinner {
    /// The suggested variant id, unless the outcome is a sentinel.
    pub fn variant(&self) -> Option<&str> {
        match self {
            SuggestedWinner::Variant(id) => Some(id),
            _ => None,
        }
    }
}
