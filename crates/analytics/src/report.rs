//! On-demand report generation.
//!
//! Every accepted request is appended to the report history before the
//! metric payload is computed. Malformed dates are rejected before that
//! write; store failures after it propagate unchanged.

use crate::stores::RecordStores;
use anyhow::Context;
use chrono::NaiveDate;
use rewards_core::store::ReportStore;
use rewards_core::types::{NewReport, ReportResult};
use rewards_core::{AnalyticsError, AnalyticsResult, Metric};
use std::sync::Arc;
use tracing::info;

const ISO_DATE: &str = "%Y-%m-%d";

pub struct ReportGenerator {
    stores: RecordStores,
    history: Arc<dyn ReportStore>,
}

impl ReportGenerator {
    pub fn new(stores: RecordStores, history: Arc<dyn ReportStore>) -> Self {
        Self { stores, history }
    }

    /// Generate a report for `metric` over `[start, end]`.
    ///
    /// `users` and `offers` report the current whole-collection total and
    /// do not apply the range; `redemption` lists each redemption in range
    /// (date, cost) in store order. Unknown metrics yield empty series.
    pub fn generate(&self, metric: &str, start: &str, end: &str) -> AnalyticsResult<ReportResult> {
        let resolved = Metric::parse(metric);
        let (start_date, end_date) = parse_range(start, end)?;

        let entry = self.history.save(NewReport::for_request(metric, start, end))?;

        let (labels, values) = match resolved {
            Metric::Users => (
                vec!["Total Users".to_string()],
                vec![report_value("user", self.stores.users.count()?)?],
            ),
            Metric::Offers => (
                vec!["Total Offers".to_string()],
                vec![report_value("offer", self.stores.offers.count()?)?],
            ),
            Metric::Redemption => self
                .stores
                .redemptions
                .find_by_date_between(start_date, end_date)?
                .into_iter()
                .map(|r| (r.date.to_string(), r.cost_points))
                .unzip(),
            Metric::Unknown => (Vec::new(), Vec::new()),
        };

        metrics::counter!("analytics.reports_generated", "metric" => resolved.as_str())
            .increment(1);
        info!(
            report_id = entry.id,
            metric = %metric,
            resolved = %resolved,
            date_range = %entry.date_range,
            points = labels.len(),
            "Report generated"
        );

        Ok(ReportResult {
            metric: metric.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            labels,
            values,
        })
    }
}

fn parse_range(start: &str, end: &str) -> AnalyticsResult<(NaiveDate, NaiveDate)> {
    let parsed = parse_iso_date("start", start).and_then(|s| Ok((s, parse_iso_date("end", end)?)));
    if parsed.is_err() {
        metrics::counter!("analytics.report_date_rejections").increment(1);
    }
    parsed
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(field: &'static str, value: &str) -> AnalyticsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE)
        .ok()
        // chrono accepts unpadded fields; require the canonical form.
        .filter(|date| date.format(ISO_DATE).to_string() == value)
        .ok_or_else(|| AnalyticsError::DateParse {
            field,
            value: value.to_string(),
        })
}

fn report_value(what: &str, count: u64) -> AnalyticsResult<i64> {
    let value = i64::try_from(count)
        .with_context(|| format!("{what} count {count} exceeds the report value range"))?;
    Ok(value)
}
