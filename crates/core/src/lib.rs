//! Shared domain model for the Rewards360 analytics engine: records, result
//! payloads, metric dispatch, store adapter traits, errors and configuration.

pub mod config;
pub mod error;
pub mod metric;
pub mod store;
pub mod types;

pub use config::AppConfig;
pub use error::{AnalyticsError, AnalyticsResult, StoreError, StoreResult};
pub use metric::Metric;
pub use store::{RecordStore, RedemptionStore, ReportStore};
