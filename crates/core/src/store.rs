//! Read-side adapter traits over the record collections, plus the write
//! interface of the report history log.

use crate::error::StoreResult;
use crate::types::{NewReport, Redemption, Report};
use chrono::NaiveDate;

/// Read-only access to one entity collection.
pub trait RecordStore<T>: Send + Sync {
    fn count(&self) -> StoreResult<u64>;

    /// Every record, in the store's natural order.
    fn find_all(&self) -> StoreResult<Vec<T>>;
}

pub trait RedemptionStore: RecordStore<Redemption> {
    /// Redemptions dated within `[start, end]`, both ends inclusive.
    /// An inverted range yields an empty result.
    fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate)
        -> StoreResult<Vec<Redemption>>;
}

/// Append-only persisted log of generated reports.
pub trait ReportStore: Send + Sync {
    /// Persist an entry, assigning it a unique increasing identity.
    fn save(&self, report: NewReport) -> StoreResult<Report>;

    /// All entries in insertion order.
    fn find_all(&self) -> StoreResult<Vec<Report>>;
}
