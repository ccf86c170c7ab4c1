//! SQLite-backed [`KeyValueStore`].

use crate::errors::AppResult;
use crate::store::KeyValueStore;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Stores each key as one row of `kv_store`.
pub struct SqliteKv<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteKv<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// All keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT key FROM kv_store WHERE substr(key, 1, ?2) = ?1 ORDER BY key ASC")?;
        let rows = stmt.query_map(params![prefix, prefix.chars().count() as i64], |row| {
            row.get::<_, String>(0)
        })?;

        let mut keys = Vec::new();
        for r in rows {
            keys.push(r?);
        }
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKv<'_> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        init_db(&conn).expect("schema");
        conn
    }

    #[test]
    fn set_overwrites_and_get_reads_back() {
        let conn = conn();
        let kv = SqliteKv::new(&conn);

        assert_eq!(kv.get("mealjournal:2025-01-01").expect("get"), None);
        kv.set("mealjournal:2025-01-01", "a").expect("set");
        kv.set("mealjournal:2025-01-01", "b").expect("set");
        assert_eq!(
            kv.get("mealjournal:2025-01-01").expect("get"),
            Some("b".to_string())
        );
    }

    #[test]
    fn prefix_listing_is_sorted_and_scoped() {
        let conn = conn();
        let kv = SqliteKv::new(&conn);
        kv.set("mealjournal:2025-01-02", "{}").expect("set");
        kv.set("mealjournal:2025-01-01", "{}").expect("set");
        kv.set("other:2025-01-01", "{}").expect("set");

        let keys = kv.keys_with_prefix("mealjournal:").expect("keys");
        assert_eq!(
            keys,
            vec![
                "mealjournal:2025-01-01".to_string(),
                "mealjournal:2025-01-02".to_string()
            ]
        );
    }
}
