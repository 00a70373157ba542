use chrono::{DateTime, NaiveDate, Timelike, Utc};
use crate::manager_owm::models::Sample;

/// Earliest hour of day a sample may represent its day with. Samples
/// before this are night readings that would misrepresent the day.
const REPRESENTATIVE_HOUR: u32 = 6;

/// Bucket key and representative lookup share this one conversion so a
/// sample can never land in a different day than its lookup assumes.
fn utc_time(dt: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(dt, 0).unwrap()
}

/// Returns the distinct UTC calendar dates of the series, in the order
/// their first sample appears. The series is already chronological, so
/// insertion order is the day order.
///
/// # Arguments
///
/// * 'series' - the forecast samples, non-decreasing by timestamp
pub fn day_buckets(series: &[Sample]) -> Vec<NaiveDate> {
    let mut buckets: Vec<NaiveDate> = Vec::new();

    for sample in series {
        let date = utc_time(sample.dt).date_naive();
        if !buckets.contains(&date) {
            buckets.push(date);
        }
    }

    buckets
}

/// Picks the representative sample for one day: the first sample in
/// series order on that date with hour of day >= 06:00.
///
/// Returns None when every sample of the day falls before the threshold.
/// That is deliberate; callers render a placeholder rather than getting
/// an arbitrary night sample.
///
/// # Arguments
///
/// * 'series' - the forecast samples, non-decreasing by timestamp
/// * 'date' - the UTC calendar date to summarize
pub fn representative(series: &[Sample], date: NaiveDate) -> Option<&Sample> {
    series.iter().find(|sample| {
        let time = utc_time(sample.dt);
        time.date_naive() == date && time.hour() >= REPRESENTATIVE_HOUR
    })
}

/// Partitions the series into day buckets paired with their
/// representative sample, if any. A linear scan per day is fine, the
/// series never exceeds a few dozen samples.
///
/// # Arguments
///
/// * 'series' - the forecast samples, non-decreasing by timestamp
pub fn partition(series: &[Sample]) -> Vec<(NaiveDate, Option<&Sample>)> {
    day_buckets(series)
        .into_iter()
        .map(|date| (date, representative(series, date)))
        .collect()
}
