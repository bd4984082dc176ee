//! In-crate test fixtures.

use crate::stores::RecordStores;
use chrono::NaiveDate;
use rewards_core::store::{RecordStore, RedemptionStore};
use rewards_core::types::{Offer, Redemption, User};
use rewards_core::{StoreError, StoreResult};
use rewards_store::InMemoryRecordStore;
use std::sync::Arc;

/// Store whose every call fails as if the backend were down.
pub struct FailingStore;

impl<T> RecordStore<T> for FailingStore {
    fn count(&self) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn find_all(&self) -> StoreResult<Vec<T>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

impl RedemptionStore for FailingStore {
    fn find_by_date_between(&self, _: NaiveDate, _: NaiveDate) -> StoreResult<Vec<Redemption>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

pub fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn user(id: u64, created: &str) -> User {
    User {
        id,
        name: format!("user-{id}"),
        email: format!("user{id}@example.com"),
        created_at: day(created).and_hms_opt(12, 0, 0).unwrap().and_utc(),
    }
}

pub fn offer(id: u64, start: &str) -> Offer {
    Offer {
        id,
        title: format!("offer-{id}"),
        start_date: day(start),
        end_date: None,
    }
}

pub fn redemption(id: u64, date: &str, cost: i64) -> Redemption {
    Redemption {
        id,
        user_id: 1,
        offer_id: 1,
        date: day(date),
        cost_points: cost,
    }
}

pub fn stores(users: Vec<User>, offers: Vec<Offer>, redemptions: Vec<Redemption>) -> RecordStores {
    RecordStores::new(
        Arc::new(InMemoryRecordStore::from_records(users)),
        Arc::new(InMemoryRecordStore::from_records(offers)),
        Arc::new(InMemoryRecordStore::from_records(redemptions)),
    )
}
