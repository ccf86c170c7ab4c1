use chrono::NaiveDate;

/// Persistence key of one journal day: `"{namespace}:{yyyy-MM-dd}"`.
pub fn day_key(namespace: &str, date: NaiveDate) -> String {
    format!("{}:{}", namespace, date.format("%Y-%m-%d"))
}

/// Inverse of [`day_key`]; `None` when the key belongs to another namespace
/// or does not carry a date.
pub fn parse_day_key(namespace: &str, key: &str) -> Option<NaiveDate> {
    let (ns, date) = key.rsplit_once(':')?;
    if ns != namespace {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
