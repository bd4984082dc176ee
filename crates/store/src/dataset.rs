//! JSON fixture of users, offers and redemptions used to seed the
//! in-memory stores.

use crate::memory::InMemoryRecordStore;
use rewards_core::types::{Offer, Redemption, User};
use rewards_core::StoreResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub redemptions: Vec<Redemption>,
}

pub struct DatasetStores {
    pub users: InMemoryRecordStore<User>,
    pub offers: InMemoryRecordStore<Offer>,
    pub redemptions: InMemoryRecordStore<Redemption>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let dataset: Dataset = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            path = %path.display(),
            users = dataset.users.len(),
            offers = dataset.offers.len(),
            redemptions = dataset.redemptions.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    pub fn into_stores(self) -> DatasetStores {
        DatasetStores {
            users: InMemoryRecordStore::from_records(self.users),
            offers: InMemoryRecordStore::from_records(self.offers),
            redemptions: InMemoryRecordStore::from_records(self.redemptions),
        }
    }
}
