use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Source records ─────────────────────────────────────────────────────────

/// A registered program member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A reward offer published to members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A member spending points on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub offer_id: u64,
    pub date: NaiveDate,
    pub cost_points: i64,
}

// ─── Report history ─────────────────────────────────────────────────────────

/// Persisted metadata about one report generation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    pub metric: String,
    pub date_range: String,
    pub generated_at: DateTime<Utc>,
}

/// A report entry awaiting an identity from the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub metric: String,
    pub date_range: String,
    pub generated_at: DateTime<Utc>,
}

impl NewReport {
    /// Entry for a generation request, stamped with the current time.
    /// The metric is kept exactly as the caller supplied it.
    pub fn for_request(metric: &str, start: &str, end: &str) -> Self {
        Self {
            metric: metric.to_string(),
            date_range: format!("{start} → {end}"),
            generated_at: Utc::now(),
        }
    }

    pub fn with_id(self, id: u64) -> Report {
        Report {
            id,
            metric: self.metric,
            date_range: self.date_range,
            generated_at: self.generated_at,
        }
    }
}

// ─── Result payloads ────────────────────────────────────────────────────────

/// Headline counts and the redemption rate (percent of users).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub user_count: u64,
    pub offer_count: u64,
    pub redemption_count: u64,
    pub redemption_rate: f64,
}

impl KpiSnapshot {
    pub fn zero() -> Self {
        Self {
            user_count: 0,
            offer_count: 0,
            redemption_count: 0,
            redemption_rate: 0.0,
        }
    }
}

/// Month-bucketed counts. `labels` and `counts` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl TrendSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Payload returned by report generation. `start`, `end` and `metric` echo
/// the caller's input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResult {
    pub metric: String,
    pub start: String,
    pub end: String,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}
