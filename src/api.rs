pub mod client;
pub mod error;
pub mod experiment;
pub mod id;
pub mod results;
