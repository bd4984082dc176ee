//! Rewards360 analytics engine: headline KPIs, monthly trends and on-demand
//! reports over users, offers and redemptions, with every generated report
//! recorded in the history log.

pub mod kpi;
pub mod report;
pub mod service;
pub mod stores;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use kpi::KpiCalculator;
pub use report::ReportGenerator;
pub use service::AnalyticsService;
pub use stores::RecordStores;
pub use trend::compute_trend;
