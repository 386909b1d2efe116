use crate::api::{
    experiment::ExperimentStatus,
    results::{ExperimentResults, SuggestedWinner, VariantResults},
};

/// Winner summary verdict for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoWinnerFound,
    NotEnoughSessions,
    Tie,
    PreliminaryWinner,
    FinalWinner,
}

impl Verdict {
    pub fn icon(&self) -> &'static str {
        match self {
            Verdict::NoWinnerFound => "pi-ban",
            Verdict::NotEnoughSessions => "pi-exclamation-circle",
            Verdict::Tie => "pi-ban",
            Verdict::PreliminaryWinner => "pi-trophy",
            Verdict::FinalWinner => "pi-trophy",
        }
    }

    /// Legend copy; `{variant}` is replaced with the winner's display name
    /// for winner-bearing verdicts.
    pub fn legend_template(&self) -> &'static str {
        match self {
            Verdict::NoWinnerFound => "No winner was found for this experiment.",
            Verdict::NotEnoughSessions => {
                "Not enough sessions have been recorded to suggest a winner."
            }
            Verdict::Tie => "The results are a statistical tie; there is no winner.",
            Verdict::PreliminaryWinner => "{variant} is the winner so far.",
            Verdict::FinalWinner => "{variant} is the winner.",
        }
    }

    fn names_a_winner(&self) -> bool {
        matches!(self, Verdict::PreliminaryWinner | Verdict::FinalWinner)
    }
}

/// A verdict rendered for display: icon reference plus filled-in legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLegend {
    pub verdict: Verdict,
    pub icon: &'static str,
    pub legend: String,
}

/// Determine the verdict for an experiment's results.
///
/// A session count of zero wins over whatever the statistical engine
/// reports, even a nominal winner.
pub fn verdict(status: ExperimentStatus, results: &ExperimentResults) -> Verdict {
    let has_sessions = results.sessions.total > 0;
    let suggested = &results.bayesian_result.suggested_winner;

    if !has_sessions || *suggested == SuggestedWinner::None {
        return if status == ExperimentStatus::Ended {
            Verdict::NoWinnerFound
        } else {
            Verdict::NotEnoughSessions
        };
    }

    if *suggested == SuggestedWinner::Tie {
        return Verdict::Tie;
    }

    if status == ExperimentStatus::Ended {
        Verdict::FinalWinner
    } else {
        Verdict::PreliminaryWinner
    }
}

/// Resolve the suggested winner into its per-variant breakdown entry.
///
/// Sentinel outcomes short-circuit to `None`, as does a suggested id that is
/// missing from the primary goal's breakdown.
pub fn suggested_winner(results: &ExperimentResults) -> Option<&VariantResults> {
    results
        .bayesian_result
        .suggested_winner
        .variant()
        .and_then(|id| results.goals.primary.variants.get(id))
}

pub fn summary(status: ExperimentStatus, results: &ExperimentResults) -> SummaryLegend {
    let verdict = self::verdict(status, results);
    let legend = match suggested_winner(results) {
        Some(winner) if verdict.names_a_winner() => verdict
            .legend_template()
            .replace("{variant}", &winner.variant_description),
        _ => verdict.legend_template().to_string(),
    };
    SummaryLegend {
        verdict,
        icon: verdict.icon(),
        legend,
    }
}
