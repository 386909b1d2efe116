use crate::api::{error::*, experiment::Experiment, id::*, results::ExperimentResults};

/// The experiments API surface consumed by the reporting layer.
#[rustfmt::skip]
pub trait Client {
    fn list_experiments(&mut self, page_id: &str) -> Result<Vec<Experiment>, StorageError>;
    fn get_experiment(&mut self, id: &ExperimentId) -> Result<Experiment, GetError>;
    fn get_results(&mut self, id: &ExperimentId) -> Result<ExperimentResults, GetError>;
    fn promote_variant(&mut self, experiment: &ExperimentId, variant: &VariantId) -> Result<Experiment, UpdateError>;
    fn archive_experiment(&mut self, id: &ExperimentId) -> Result<Experiment, UpdateError>;
}
