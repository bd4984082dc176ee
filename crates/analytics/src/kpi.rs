//! Headline KPI snapshot.
//!
//! This is the one place a store failure is absorbed: the snapshot falls back
//! to all zeros so a dashboard tile never errors out.

use crate::stores::RecordStores;
use rewards_core::types::KpiSnapshot;
use rewards_core::StoreResult;
use tracing::{debug, error};

pub struct KpiCalculator {
    stores: RecordStores,
}

impl KpiCalculator {
    pub fn new(stores: RecordStores) -> Self {
        Self { stores }
    }

    /// Current counts and redemption rate, or [`KpiSnapshot::zero`] if any
    /// count cannot be read.
    pub fn compute(&self) -> KpiSnapshot {
        match self.try_compute() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                metrics::counter!("analytics.kpi_fallbacks").increment(1);
                error!(error = %e, "Failed to fetch KPIs, returning zero snapshot");
                KpiSnapshot::zero()
            }
        }
    }

    fn try_compute(&self) -> StoreResult<KpiSnapshot> {
        let user_count = self.stores.users.count()?;
        let offer_count = self.stores.offers.count()?;
        let redemption_count = self.stores.redemptions.count()?;
        let redemption_rate = redemption_rate(redemption_count, user_count);

        debug!(
            users = user_count,
            offers = offer_count,
            redemptions = redemption_count,
            rate = redemption_rate,
            "KPIs computed"
        );

        Ok(KpiSnapshot {
            user_count,
            offer_count,
            redemption_count,
            redemption_rate,
        })
    }
}

/// Redemptions per user as a percentage; 0 when there are no users.
pub fn redemption_rate(redemptions: u64, users: u64) -> f64 {
    if users > 0 {
        redemptions as f64 / users as f64 * 100.0
    } else {
        0.0
    }
}
