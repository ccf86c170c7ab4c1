use crate::models::DaySummary;
use crate::store::{KeyValueStore, load_day, parse_day_key};

/// Summaries of every stored day, oldest first. Keys that do not parse as a
/// day of `namespace` are skipped.
pub fn summaries<K: KeyValueStore>(
    kv: &K,
    keys: &[String],
    namespace: &str,
    default_limit: u32,
) -> Vec<DaySummary> {
    let mut days: Vec<DaySummary> = keys
        .iter()
        .filter_map(|k| parse_day_key(namespace, k))
        .map(|date| DaySummary::from_state(date, &load_day(kv, namespace, date, default_limit)))
        .collect();

    days.sort_by_key(|d| d.date);
    days.dedup_by_key(|d| d.date);
    days
}
