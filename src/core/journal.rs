//! Wiring of the journal store onto the SQLite database.

use crate::config::Config;
use crate::db::SqliteKv;
use crate::errors::{AppError, AppResult};
use crate::models::DailyState;
use crate::store::{JournalSettings, JournalStore, SystemClock, load_day};
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::Connection;

pub type SqliteJournal<'c> = JournalStore<SqliteKv<'c>, SystemClock>;

/// Today's journal backed by `conn`.
pub fn open<'c>(conn: &'c Connection, cfg: &Config) -> SqliteJournal<'c> {
    JournalStore::open(SqliteKv::new(conn), SystemClock, JournalSettings::from(cfg))
}

/// Read-only view of any stored day.
pub fn load(conn: &Connection, cfg: &Config, day: NaiveDate) -> DailyState {
    load_day(
        &SqliteKv::new(conn),
        &cfg.namespace,
        day,
        cfg.default_daily_limit,
    )
}

/// Resolve an optional `--day` argument; `None` means today.
pub fn resolve_day(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(date::today()),
    }
}
