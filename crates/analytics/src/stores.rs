use rewards_core::store::{RecordStore, RedemptionStore};
use rewards_core::types::{Offer, User};
use std::sync::Arc;

/// Handles to the three record collections the engine reads from.
#[derive(Clone)]
pub struct RecordStores {
    pub users: Arc<dyn RecordStore<User>>,
    pub offers: Arc<dyn RecordStore<Offer>>,
    pub redemptions: Arc<dyn RedemptionStore>,
}

impl RecordStores {
    pub fn new(
        users: Arc<dyn RecordStore<User>>,
        offers: Arc<dyn RecordStore<Offer>>,
        redemptions: Arc<dyn RedemptionStore>,
    ) -> Self {
        Self {
            users,
            offers,
            redemptions,
        }
    }
}
