//! Calendar-month bucketing of dated records.

use chrono::{Datelike, NaiveDate};
use rewards_core::types::TrendSeries;
use std::collections::BTreeMap;

/// Count `records` per calendar month of the date picked by `date_of`.
///
/// Buckets come out earliest first, labelled "Mon YYYY". Months without
/// records are omitted rather than zero-filled.
pub fn compute_trend<T, F>(records: &[T], date_of: F) -> TrendSeries
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<(i32, u32), (NaiveDate, u64)> = BTreeMap::new();
    for record in records {
        let date = date_of(record);
        buckets
            .entry((date.year(), date.month()))
            .or_insert((date, 0))
            .1 += 1;
    }

    let (labels, counts) = buckets
        .into_values()
        .map(|(date, count)| (month_label(date), count))
        .unzip();

    TrendSeries { labels, counts }
}

/// "Jan 2024" style label for the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
