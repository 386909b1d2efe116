pub mod api;
pub mod backend;
pub mod report;

pub use api::client::Client;
pub use api::id::{ExperimentId, VariantId};
pub use report::store::ReportStore;
