//! Insertion-ordered in-memory record collections.

use chrono::NaiveDate;
use parking_lot::RwLock;
use rewards_core::store::{RecordStore, RedemptionStore};
use rewards_core::types::Redemption;
use rewards_core::StoreResult;

pub struct InMemoryRecordStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryRecordStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn insert(&self, record: T) {
        self.records.write().push(record);
    }

    pub fn extend(&self, records: impl IntoIterator<Item = T>) {
        self.records.write().extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> RecordStore<T> for InMemoryRecordStore<T> {
    fn count(&self) -> StoreResult<u64> {
        Ok(self.records.read().len() as u64)
    }

    fn find_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.records.read().clone())
    }
}

impl RedemptionStore for InMemoryRecordStore<Redemption> {
    fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<Redemption>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}
