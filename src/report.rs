//! Report view-model derivation.
//!
//! Everything in here is a pure projection over the raw `Experiment` and
//! `ExperimentResults` snapshots held by [`store::ReportStore`]. Derivations
//! are recomputed on demand; there is no caching and no change propagation.

pub mod chart;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod detail;
pub mod promote;
pub mod store;
pub mod summary;

pub use store::{PromoteViewModel, ReportStore, ReportViewModel};
pub use summary::{SummaryLegend, Verdict};
