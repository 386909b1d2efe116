use crate::{
    api::{
        client::Client,
        error::{GetError, UpdateError},
        experiment::{Experiment, ExperimentStatus},
        results::{ExperimentResults, VariantResults},
    },
    report::{
        chart::{self, ChartData},
        detail::{self, DetailRow},
        promote::{self, EligibleVariant},
        summary::{self, SummaryLegend},
    },
    ExperimentId, VariantId,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Init,
    Loading,
    Idle,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoteDialog {
    pub status: ComponentStatus,
    pub visible: bool,
}

#[derive(Error, Debug)]
pub enum PromoteError {
    #[error("a promotion request is already in flight")]
    InFlight,
    #[error("no experiment is loaded")]
    NoExperiment,
    #[error(transparent)]
    Request(#[from] UpdateError),
}

/// Report state for one experiment.
///
/// Holds the raw snapshots and the promotion dialog sub-state; every view
/// field is derived on demand by [`view_model`][ReportStore::view_model] and
/// [`promote_view_model`][ReportStore::promote_view_model]. Mutation goes
/// through the named transitions and the two effects, nothing else.
#[derive(Debug)]
pub struct ReportStore {
    experiment: Option<Experiment>,
    results: Option<ExperimentResults>,
    status: ComponentStatus,
    promote_dialog: PromoteDialog,
}

impl Default for ReportStore {
    fn default() -> Self {
        ReportStore {
            experiment: None,
            results: None,
            status: ComponentStatus::Init,
            promote_dialog: PromoteDialog {
                status: ComponentStatus::Idle,
                visible: false,
            },
        }
    }
}

/// State access.
impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn experiment(&self) -> Option<&Experiment> {
        self.experiment.as_ref()
    }

    pub fn results(&self) -> Option<&ExperimentResults> {
        self.results.as_ref()
    }

    pub fn status(&self) -> ComponentStatus {
        self.status
    }

    pub fn promote_dialog(&self) -> PromoteDialog {
        self.promote_dialog
    }
}

/// Named transitions.
impl ReportStore {
    pub fn set_status(&mut self, status: ComponentStatus) {
        self.status = status;
    }

    pub fn set_dialog_status(&mut self, status: ComponentStatus) {
        self.promote_dialog.status = status;
    }

    pub fn show_promote_dialog(&mut self) {
        self.promote_dialog.visible = true;
    }

    pub fn hide_promote_dialog(&mut self) {
        self.promote_dialog.visible = false;
    }

    /// Merge a server-returned experiment into the loaded one and force the
    /// promotion dialog closed.
    pub fn set_experiment(&mut self, experiment: Experiment) {
        match self.experiment.as_mut() {
            Some(current) => current.merge_from(experiment),
            None => self.experiment = Some(experiment),
        }
        self.promote_dialog.visible = false;
    }
}

/// Effects.
impl ReportStore {
    /// Fetch the experiment and its results as one combined operation.
    ///
    /// Both snapshots are committed together once both requests succeed; a
    /// failure of either discards both halves. The loading status is reset
    /// on every exit path, and the error is handed back verbatim for the
    /// caller's error display.
    pub fn load(&mut self, client: &mut dyn Client, id: &ExperimentId) -> Result<(), GetError> {
        self.set_status(ComponentStatus::Loading);
        tracing::debug!(experiment = id.as_ref(), "loading experiment and results");
        let fetched = fetch_both(client, id);
        self.set_status(ComponentStatus::Idle);
        match fetched {
            Ok((experiment, results)) => {
                self.experiment = Some(experiment);
                self.results = Some(results);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    experiment = id.as_ref(),
                    "combined fetch failed, discarding both halves"
                );
                Err(error)
            }
        }
    }

    /// Promote a variant of the loaded experiment.
    ///
    /// A second submission while one is in flight is rejected. On success
    /// the server-returned experiment is merged into local state, which also
    /// hides the promotion dialog. The saving flag is reset on every exit
    /// path.
    pub fn promote(
        &mut self,
        client: &mut dyn Client,
        variant: &VariantId,
    ) -> Result<(), PromoteError> {
        if self.promote_dialog.status == ComponentStatus::Saving {
            return Err(PromoteError::InFlight);
        }
        let experiment_id = self
            .experiment
            .as_ref()
            .map(|experiment| experiment.id.clone())
            .ok_or(PromoteError::NoExperiment)?;

        self.set_dialog_status(ComponentStatus::Saving);
        tracing::debug!(
            experiment = experiment_id.as_ref(),
            variant = variant.as_ref(),
            "promoting variant"
        );
        let submitted = client.promote_variant(&experiment_id, variant);
        self.set_dialog_status(ComponentStatus::Idle);
        match submitted {
            Ok(experiment) => {
                self.set_experiment(experiment);
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }
}

fn fetch_both(
    client: &mut dyn Client,
    id: &ExperimentId,
) -> Result<(Experiment, ExperimentResults), GetError> {
    let experiment = client.get_experiment(id)?;
    let results = client.get_results(id)?;
    Ok((experiment, results))
}

/// Everything the report screen needs, derived from the current snapshot.
#[derive(Debug)]
pub struct ReportViewModel {
    pub is_loading: bool,
    pub has_enough_sessions: bool,
    pub show_summary: bool,
    pub chart: Option<ChartData>,
    pub detail: Vec<DetailRow>,
    pub summary: Option<SummaryLegend>,
    pub suggested_winner: Option<VariantResults>,
    pub show_promote_dialog: bool,
}

/// Promotion dialog state, derived; `None` until an experiment is loaded.
#[derive(Debug)]
pub struct PromoteViewModel {
    pub experiment_id: ExperimentId,
    pub show_dialog: bool,
    pub is_saving: bool,
    pub variants: Option<Vec<EligibleVariant>>,
}

/// Derived view models.
impl ReportStore {
    pub fn view_model(&self) -> ReportViewModel {
        let summary = match (&self.experiment, &self.results) {
            (Some(experiment), Some(results)) => {
                Some(summary::summary(experiment.status, results))
            }
            _ => None,
        };

        ReportViewModel {
            is_loading: self.status == ComponentStatus::Loading,
            has_enough_sessions: self
                .results
                .as_ref()
                .map_or(false, |results| results.sessions.total > 0),
            show_summary: matches!(
                self.experiment.as_ref().map(|experiment| experiment.status),
                Some(ExperimentStatus::Running)
                    | Some(ExperimentStatus::Ended)
                    | Some(ExperimentStatus::Archived)
            ),
            chart: chart::chart_data(self.results.as_ref()),
            detail: self
                .results
                .as_ref()
                .map(detail::detail_rows)
                .unwrap_or_default(),
            summary,
            suggested_winner: self
                .results
                .as_ref()
                .and_then(summary::suggested_winner)
                .cloned(),
            show_promote_dialog: self.promote_dialog.visible,
        }
    }

    pub fn promote_view_model(&self) -> Option<PromoteViewModel> {
        let experiment = self.experiment.as_ref()?;
        Some(PromoteViewModel {
            experiment_id: experiment.id.clone(),
            show_dialog: self.promote_dialog.visible,
            is_saving: self.promote_dialog.status == ComponentStatus::Saving,
            variants: self
                .results
                .as_ref()
                .map(|results| promote::eligible_variants(experiment, results)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::StorageError;
    use crate::report::summary::Verdict;
    use crate::report::test_fixtures::{experiment, results_with, Outcome};
    use anyhow::anyhow;

    /// Scripted client: serves the fixture payloads or fails on demand.
    struct ScriptedClient {
        experiment: Experiment,
        results: ExperimentResults,
        fail_results: bool,
        fail_promote: bool,
        promote_calls: u32,
    }

    impl ScriptedClient {
        fn new(experiment: Experiment, results: ExperimentResults) -> Self {
            ScriptedClient {
                experiment,
                results,
                fail_results: false,
                fail_promote: false,
                promote_calls: 0,
            }
        }
    }

    impl Client for ScriptedClient {
        fn list_experiments(&mut self, _page_id: &str) -> Result<Vec<Experiment>, StorageError> {
            Ok(vec![self.experiment.clone()])
        }

        fn get_experiment(&mut self, _id: &ExperimentId) -> Result<Experiment, GetError> {
            Ok(self.experiment.clone())
        }

        fn get_results(&mut self, id: &ExperimentId) -> Result<ExperimentResults, GetError> {
            if self.fail_results {
                Err(GetError::DoesNotExist(id.as_ref().to_string()))
            } else {
                Ok(self.results.clone())
            }
        }

        fn promote_variant(
            &mut self,
            _experiment: &ExperimentId,
            variant: &VariantId,
        ) -> Result<Experiment, UpdateError> {
            self.promote_calls += 1;
            if self.fail_promote {
                return Err(UpdateError::Storage(anyhow!("connection reset")));
            }
            let mut promoted = self.experiment.clone();
            promoted.name = "X".to_string();
            for configured in promoted.traffic_proportion.variants.iter_mut() {
                configured.promoted = configured.id == *variant;
            }
            promoted.goals = None;
            Ok(promoted)
        }

        fn archive_experiment(&mut self, _id: &ExperimentId) -> Result<Experiment, UpdateError> {
            let mut archived = self.experiment.clone();
            archived.status = ExperimentStatus::Archived;
            Ok(archived)
        }
    }

    fn loaded_store(client: &mut ScriptedClient) -> ReportStore {
        let mut store = ReportStore::new();
        store.load(client, &"exp-1".into()).unwrap();
        store
    }

    #[test]
    fn load_commits_both_halves_atomically() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        let store = loaded_store(&mut client);
        assert!(store.experiment().is_some());
        assert!(store.results().is_some());
        assert_eq!(store.status(), ComponentStatus::Idle);
    }

    #[test]
    fn failed_fetch_discards_both_halves_and_resets_status() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        client.fail_results = true;
        let mut store = ReportStore::new();
        let outcome = store.load(&mut client, &"exp-1".into());
        assert!(matches!(outcome, Err(GetError::DoesNotExist(_))));
        assert!(store.experiment().is_none());
        assert!(store.results().is_none());
        assert_eq!(store.status(), ComponentStatus::Idle);
    }

    #[test]
    fn view_model_for_a_running_winner() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        let store = loaded_store(&mut client);
        let vm = store.view_model();
        assert!(!vm.is_loading);
        assert!(vm.has_enough_sessions);
        assert!(vm.show_summary);
        assert_eq!(vm.summary.as_ref().unwrap().verdict, Verdict::PreliminaryWinner);
        assert_eq!(vm.suggested_winner.unwrap().variant_name, "variant-b");
        assert!(vm
            .detail
            .iter()
            .find(|row| row.id == "variant-b")
            .unwrap()
            .is_winner);
        assert_eq!(vm.chart.unwrap().series.len(), 2);
    }

    #[test]
    fn view_model_before_load_has_no_data() {
        let store = ReportStore::new();
        let vm = store.view_model();
        assert!(vm.chart.is_none());
        assert!(vm.detail.is_empty());
        assert!(vm.summary.is_none());
        assert!(!vm.show_summary);
        assert!(store.promote_view_model().is_none());
    }

    #[test]
    fn draft_experiment_hides_the_summary() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Draft),
            results_with(0, Outcome::None),
        );
        let store = loaded_store(&mut client);
        assert!(!store.view_model().show_summary);
        assert!(!store.view_model().has_enough_sessions);
    }

    #[test]
    fn promote_merges_the_response_and_hides_the_dialog() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        let mut store = loaded_store(&mut client);
        store.show_promote_dialog();

        // give the loaded experiment an optional field the response omits
        store.experiment.as_mut().unwrap().scheduling =
            Some(crate::api::experiment::Scheduling {
                start_date: 1,
                end_date: 2,
            });

        store.promote(&mut client, &"variant-b".into()).unwrap();

        let merged = store.experiment().unwrap();
        assert_eq!(merged.name, "X");
        assert!(merged.scheduling.is_some());
        assert!(!store.promote_dialog().visible);
        assert_eq!(store.promote_dialog().status, ComponentStatus::Idle);

        let vm = store.promote_view_model().unwrap();
        let challenger = vm
            .variants
            .unwrap()
            .into_iter()
            .find(|variant| variant.id == "variant-b")
            .unwrap();
        assert!(challenger.is_promoted);
    }

    #[test]
    fn failed_promote_resets_the_saving_flag() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        client.fail_promote = true;
        let mut store = loaded_store(&mut client);
        let outcome = store.promote(&mut client, &"variant-b".into());
        assert!(matches!(outcome, Err(PromoteError::Request(_))));
        assert_eq!(store.promote_dialog().status, ComponentStatus::Idle);
        // local experiment untouched
        assert_eq!(store.experiment().unwrap().name, "Hero banner copy");
    }

    #[test]
    fn promote_without_experiment_is_rejected() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::None),
        );
        let mut store = ReportStore::new();
        let outcome = store.promote(&mut client, &"variant-b".into());
        assert!(matches!(outcome, Err(PromoteError::NoExperiment)));
        assert_eq!(client.promote_calls, 0);
    }

    #[test]
    fn promote_rejects_a_second_in_flight_submission() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Running),
            results_with(1000, Outcome::None),
        );
        let mut store = loaded_store(&mut client);
        store.set_dialog_status(ComponentStatus::Saving);
        let outcome = store.promote(&mut client, &"variant-b".into());
        assert!(matches!(outcome, Err(PromoteError::InFlight)));
        assert_eq!(client.promote_calls, 0);
    }

    #[test]
    fn recomputing_from_the_same_snapshot_is_idempotent() {
        let mut client = ScriptedClient::new(
            experiment(ExperimentStatus::Ended),
            results_with(1000, Outcome::Winner("variant-b")),
        );
        let store = loaded_store(&mut client);
        let first = store.view_model();
        let second = store.view_model();
        assert_eq!(first.chart, second.chart);
        assert_eq!(first.detail, second.detail);
        assert_eq!(first.summary, second.summary);
        assert_eq!(
            first.summary.unwrap().verdict,
            Verdict::FinalWinner
        );
    }
}
