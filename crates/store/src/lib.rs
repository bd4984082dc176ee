//! Store adapters for the analytics engine: in-memory record collections,
//! report history logs (in-memory and JSON Lines on disk) and the dataset
//! loader that seeds them.

pub mod dataset;
pub mod history;
pub mod memory;

pub use dataset::Dataset;
pub use history::{InMemoryReportLog, JsonlReportLog};
pub use memory::InMemoryRecordStore;
