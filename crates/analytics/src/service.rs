//! Caller-facing facade: KPIs, trends, report generation and the
//! pass-through history listings.

use crate::kpi::KpiCalculator;
use crate::report::ReportGenerator;
use crate::stores::RecordStores;
use crate::trend::compute_trend;
use rewards_core::store::ReportStore;
use rewards_core::types::{KpiSnapshot, Offer, Redemption, Report, ReportResult, TrendSeries, User};
use rewards_core::{AnalyticsResult, Metric};
use std::sync::Arc;
use tracing::{debug, info};

pub struct AnalyticsService {
    stores: RecordStores,
    history: Arc<dyn ReportStore>,
    kpis: KpiCalculator,
    reports: ReportGenerator,
}

impl AnalyticsService {
    pub fn new(stores: RecordStores, history: Arc<dyn ReportStore>) -> Self {
        info!("Analytics service initialized");
        Self {
            kpis: KpiCalculator::new(stores.clone()),
            reports: ReportGenerator::new(stores.clone(), history.clone()),
            stores,
            history,
        }
    }

    /// Headline counts; never fails (see [`KpiCalculator::compute`]).
    pub fn get_kpis(&self) -> KpiSnapshot {
        self.kpis.compute()
    }

    /// Monthly series for `metric`. Unknown metrics give an empty series.
    pub fn get_trend(&self, metric: &str) -> AnalyticsResult<TrendSeries> {
        let resolved = Metric::parse(metric);
        let trend = match resolved {
            Metric::Users => compute_trend(&self.stores.users.find_all()?, |u: &User| {
                u.created_at.date_naive()
            }),
            Metric::Offers => {
                compute_trend(&self.stores.offers.find_all()?, |o: &Offer| o.start_date)
            }
            Metric::Redemption => {
                compute_trend(&self.stores.redemptions.find_all()?, |r: &Redemption| r.date)
            }
            Metric::Unknown => TrendSeries::empty(),
        };
        debug!(metric = %resolved, buckets = trend.len(), "Trend computed");
        Ok(trend)
    }

    pub fn generate_report(
        &self,
        metric: &str,
        start: &str,
        end: &str,
    ) -> AnalyticsResult<ReportResult> {
        self.reports.generate(metric, start, end)
    }

    pub fn get_reports_history(&self) -> AnalyticsResult<Vec<Report>> {
        Ok(self.history.find_all()?)
    }

    pub fn get_users_history(&self) -> AnalyticsResult<Vec<User>> {
        Ok(self.stores.users.find_all()?)
    }

    pub fn get_offers_history(&self) -> AnalyticsResult<Vec<Offer>> {
        Ok(self.stores.offers.find_all()?)
    }

    pub fn get_redemptions_history(&self) -> AnalyticsResult<Vec<Redemption>> {
        Ok(self.stores.redemptions.find_all()?)
    }
}
