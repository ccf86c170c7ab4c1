//! The daily journal: entries and limit of the current calendar day.

use super::clock::Clock;
use super::day_key::day_key;
use super::kv::KeyValueStore;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{ChartData, DailyState, Entry, NewEntry, Progress};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Knobs the journal needs from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSettings {
    pub namespace: String,
    pub default_limit: u32,
    pub min_limit: u32,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            namespace: "mealjournal".to_string(),
            default_limit: crate::config::DEFAULT_DAILY_LIMIT,
            min_limit: crate::config::MIN_DAILY_LIMIT,
        }
    }
}

impl From<&Config> for JournalSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            namespace: cfg.namespace.clone(),
            default_limit: cfg.default_daily_limit,
            min_limit: cfg.min_daily_limit,
        }
    }
}

/// Load the persisted state of any day.
///
/// Absent, unreadable and malformed records all yield a fresh state with
/// `default_limit`; the latter two are logged.
pub fn load_day<K: KeyValueStore>(
    kv: &K,
    namespace: &str,
    date: NaiveDate,
    default_limit: u32,
) -> DailyState {
    let key = day_key(namespace, date);

    match kv.get(&key) {
        Ok(Some(raw)) => match DailyState::from_json(&raw) {
            Ok(state) => {
                debug!(%key, entries = state.entries.len(), "loaded journal day");
                state
            }
            Err(e) => {
                warn!(%key, error = %e, "malformed journal record, starting from defaults");
                DailyState::new(default_limit)
            }
        },
        Ok(None) => {
            debug!(%key, "no journal record yet");
            DailyState::new(default_limit)
        }
        Err(e) => {
            warn!(%key, error = %e, "failed to read journal record, starting from defaults");
            DailyState::new(default_limit)
        }
    }
}

/// Owns the [`DailyState`] of the current day.
///
/// Mutations recompute the day from the clock first, so a store kept open
/// across midnight starts writing to the new day's record. Read accessors
/// look at the day of the last operation; call [`JournalStore::refresh`] to
/// pick up a date change without mutating.
pub struct JournalStore<K, C> {
    kv: K,
    clock: C,
    settings: JournalSettings,
    day: NaiveDate,
    state: DailyState,
}

impl<K: KeyValueStore, C: Clock> JournalStore<K, C> {
    pub fn open(kv: K, clock: C, settings: JournalSettings) -> Self {
        let day = clock.now().date_naive();
        let state = load_day(&kv, &settings.namespace, day, settings.default_limit);
        Self {
            kv,
            clock,
            settings,
            day,
            state,
        }
    }

    /// Switch to the clock's current day if it changed since the last
    /// operation. Returns `true` on a switch.
    pub fn refresh(&mut self) -> bool {
        let today = self.clock.now().date_naive();
        if today == self.day {
            return false;
        }

        debug!(from = %self.day, to = %today, "journal day rolled over");
        self.state = load_day(
            &self.kv,
            &self.settings.namespace,
            today,
            self.settings.default_limit,
        );
        self.day = today;
        true
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn day_key(&self) -> String {
        day_key(&self.settings.namespace, self.day)
    }

    pub fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    /// Newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    pub fn state(&self) -> &DailyState {
        &self.state
    }

    pub fn daily_limit(&self) -> u32 {
        self.state.limit
    }

    pub fn total_kcal(&self) -> u64 {
        self.state.total_kcal()
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.total_kcal(), self.state.limit)
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData::from_state(&self.state)
    }

    /// Record a meal. The entry is placed first (newest-first order) and the
    /// day is persisted.
    pub fn add_entry(&mut self, new: NewEntry) -> Entry {
        self.refresh();

        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let entry = new.into_entry(id, now);

        debug!(id = %entry.id, name = %entry.name, kcal = entry.kcal, "adding entry");
        self.state.entries.insert(0, entry.clone());
        self.persist();
        entry
    }

    /// Remove an entry by id. Unknown ids are not an error. The day is
    /// persisted either way. Returns whether an entry was removed.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        self.refresh();

        let before = self.state.entries.len();
        self.state.entries.retain(|e| e.id != id);
        let removed = self.state.entries.len() != before;

        if !removed {
            debug!(%id, "remove_entry: no such entry");
        }
        self.persist();
        removed
    }

    /// Replace the daily limit. Values below the configured minimum are
    /// rejected and leave the state untouched.
    pub fn set_daily_limit(&mut self, limit: u32) -> AppResult<()> {
        self.refresh();

        if limit < self.settings.min_limit {
            return Err(AppError::InvalidLimit {
                value: limit,
                min: self.settings.min_limit,
            });
        }

        self.state.limit = limit;
        self.persist();
        Ok(())
    }

    /// Ids are epoch milliseconds of creation, bumped past any id already
    /// present so that they stay unique and increasing within a day.
    fn next_id(&self, now_ms: i64) -> String {
        let max_existing = self
            .state
            .entries
            .iter()
            .filter_map(|e| e.id.parse::<i64>().ok())
            .max();

        let id = match max_existing {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        };
        id.to_string()
    }

    /// Write the whole day. Failures are logged and otherwise ignored: the
    /// in-memory state stays authoritative for this session.
    fn persist(&self) {
        let key = self.day_key();

        let raw = match self.state.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%key, error = %e, "failed to serialize journal day");
                return;
            }
        };

        match self.kv.set(&key, &raw) {
            Ok(()) => debug!(%key, bytes = raw.len(), "journal day persisted"),
            Err(e) => warn!(%key, error = %e, "failed to persist journal day"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;
    use crate::store::clock::FixedClock;
    use crate::store::kv::MemoryKv;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn at(d: u32, h: u32, m: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 5, d, h, m, 0)
            .single()
            .expect("valid local time")
    }

    fn store<'a>(
        kv: &'a MemoryKv,
        clock: &'a FixedClock,
    ) -> JournalStore<&'a MemoryKv, &'a FixedClock> {
        JournalStore::open(kv, clock, JournalSettings::default())
    }

    #[test]
    fn fresh_day_uses_defaults() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 9, 0));
        let s = store(&kv, &clock);

        assert_eq!(s.daily_limit(), 2000);
        assert!(s.entries().is_empty());
        assert_eq!(s.total_kcal(), 0);
        assert_eq!(s.day_key(), "mealjournal:2025-05-03");
    }

    #[test]
    fn total_is_order_independent() {
        let kcals = [450.0, 150.0, 80.0, 620.0];

        let kv_a = MemoryKv::new();
        let clock_a = FixedClock::new(at(3, 8, 0));
        let mut a = store(&kv_a, &clock_a);
        for k in kcals {
            a.add_entry(NewEntry::new("x", k));
            clock_a.advance(Duration::minutes(10));
        }

        let kv_b = MemoryKv::new();
        let clock_b = FixedClock::new(at(3, 8, 0));
        let mut b = store(&kv_b, &clock_b);
        for k in kcals.iter().rev() {
            b.add_entry(NewEntry::new("x", *k));
            clock_b.advance(Duration::minutes(10));
        }

        assert_eq!(a.total_kcal(), 1300);
        assert_eq!(b.total_kcal(), 1300);
    }

    #[test]
    fn entries_are_newest_first_with_increasing_ids() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 12, 0));
        let mut s = store(&kv, &clock);

        let first = s.add_entry(NewEntry::new("Soup", 200.0));
        // same instant: id must still be unique
        let second = s.add_entry(NewEntry::new("Bread", 120.0));

        assert_ne!(first.id, second.id);
        assert!(second.id.parse::<i64>().unwrap() > first.id.parse::<i64>().unwrap());
        assert_eq!(s.entries()[0].name, "Bread");
        assert_eq!(s.entries()[1].name, "Soup");
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 12, 0));
        let mut s = store(&kv, &clock);
        s.add_entry(NewEntry::new("Soup", 200.0));
        let before = s.entries().to_vec();

        assert!(!s.remove_entry("does-not-exist"));
        assert_eq!(s.entries(), before.as_slice());
    }

    #[test]
    fn add_then_remove_restores_previous_entries() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 12, 0));
        let mut s = store(&kv, &clock);
        s.add_entry(NewEntry::new("Soup", 200.0));
        clock.advance(Duration::minutes(5));
        let before = s.entries().to_vec();

        let added = s.add_entry(NewEntry::new("Cake", 350.0));
        assert!(s.remove_entry(&added.id));
        assert_eq!(s.entries(), before.as_slice());

        let reloaded = store(&kv, &clock);
        assert_eq!(reloaded.entries(), before.as_slice());
    }

    #[test]
    fn chart_is_cumulative_in_timestamp_order() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 13, 0));
        let mut s = store(&kv, &clock);

        // insert the later meal first
        s.add_entry(NewEntry::new("Dinner", 200.0));
        clock.set(at(3, 8, 30));
        s.add_entry(NewEntry::new("Breakfast", 300.0));

        let chart = s.chart_data();
        assert_eq!(chart.values, vec![0, 300, 500]);
        assert_eq!(chart.labels.len(), chart.values.len());
        assert_eq!(chart.labels[0], "Start");
    }

    #[test]
    fn chart_of_empty_day_is_well_formed() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(3, 13, 0));
        let s = store(&kv, &clock);

        let chart = s.chart_data();
        assert!(!chart.is_empty());
        assert_eq!(chart.labels.len(), chart.values.len());
        assert_eq!(chart.limit.len(), chart.values.len());
    }

    #[test]
    fn persisted_day_reloads_identically() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(4, 7, 45));
        let mut s = store(&kv, &clock);
        s.set_daily_limit(1800).expect("valid limit");
        s.add_entry(NewEntry::new("Oats", 380.0).with_macros(Macros {
            protein: 13,
            carbs: 60,
            fat: 7,
        }));
        clock.advance(Duration::hours(5));
        let mut lunch = NewEntry::new("Salad", 150.0);
        lunch.reasoning = Some("Mostly greens".into());
        s.add_entry(lunch);

        let reloaded = store(&kv, &clock);
        assert_eq!(reloaded.daily_limit(), 1800);
        assert_eq!(reloaded.entries(), s.entries());
        assert_eq!(reloaded.state(), s.state());
    }

    #[test]
    fn pizza_and_salad_example() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(5, 12, 0));
        let mut s = store(&kv, &clock);

        s.add_entry(NewEntry::new("Pizza", 450.0));
        clock.advance(Duration::hours(6));
        s.add_entry(NewEntry::new("Salad", 150.0));
        assert_eq!(s.total_kcal(), 600);

        s.set_daily_limit(2000).expect("valid limit");
        let p = s.progress();
        assert!((p.ratio - 0.30).abs() < 1e-9);
    }

    #[test]
    fn limit_below_minimum_is_rejected() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(5, 12, 0));
        let mut s = store(&kv, &clock);

        let err = s.set_daily_limit(499).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidLimit {
                value: 499,
                min: 500
            }
        ));
        assert_eq!(s.daily_limit(), 2000);
        assert!(kv.raw("mealjournal:2025-05-05").is_none());

        s.set_daily_limit(500).expect("minimum is allowed");
        assert_eq!(s.daily_limit(), 500);
    }

    #[test]
    fn malformed_record_falls_back_to_defaults() {
        let kv = MemoryKv::new();
        kv.insert_raw("mealjournal:2025-05-06", "{not json");
        let clock = FixedClock::new(at(6, 10, 0));
        let s = store(&kv, &clock);

        assert_eq!(s.daily_limit(), 2000);
        assert!(s.entries().is_empty());
    }

    #[test]
    fn unreadable_store_falls_back_to_defaults() {
        let kv = MemoryKv::new();
        kv.insert_raw("mealjournal:2025-05-06", r#"{"limit":900,"entries":[]}"#);
        kv.fail_reads(true);
        let clock = FixedClock::new(at(6, 10, 0));
        let s = store(&kv, &clock);

        assert_eq!(s.daily_limit(), 2000);
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let kv = MemoryKv::new();
        kv.fail_writes(true);
        let clock = FixedClock::new(at(6, 10, 0));
        let mut s = store(&kv, &clock);

        s.add_entry(NewEntry::new("Bagel", 270.0));
        assert_eq!(s.total_kcal(), 270);
        assert!(kv.raw("mealjournal:2025-05-06").is_none());
    }

    #[test]
    fn mutation_after_midnight_goes_to_the_new_day() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(7, 23, 50));
        let mut s = store(&kv, &clock);
        s.set_daily_limit(1500).expect("valid limit");
        s.add_entry(NewEntry::new("Late snack", 180.0));

        clock.advance(Duration::minutes(20));
        s.add_entry(NewEntry::new("Midnight toast", 120.0));

        assert_eq!(s.day_key(), "mealjournal:2025-05-08");
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.daily_limit(), 2000);

        let yesterday = load_day(
            &kv,
            "mealjournal",
            NaiveDate::from_ymd_opt(2025, 5, 7).unwrap(),
            2000,
        );
        assert_eq!(yesterday.limit, 1500);
        assert_eq!(yesterday.entries.len(), 1);
        assert_eq!(yesterday.entries[0].name, "Late snack");
        for e in &yesterday.entries {
            assert_eq!(e.timestamp.date_naive(), at(7, 0, 0).date_naive());
        }
    }

    #[test]
    fn refresh_reports_day_change() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(9, 10, 0));
        let mut s = store(&kv, &clock);
        assert!(!s.refresh());
        clock.advance(Duration::days(1));
        assert!(s.refresh());
        assert_eq!(s.day(), at(10, 0, 0).date_naive());
    }

    #[test]
    fn stale_days_are_kept() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(at(11, 9, 0));
        let mut s = store(&kv, &clock);
        s.add_entry(NewEntry::new("Day one", 100.0));
        clock.advance(Duration::days(1));
        s.add_entry(NewEntry::new("Day two", 100.0));

        assert_eq!(
            kv.keys(),
            vec![
                "mealjournal:2025-05-11".to_string(),
                "mealjournal:2025-05-12".to_string()
            ]
        );
    }
}
