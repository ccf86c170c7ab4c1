//! Key-value persistence seam used by the journal.

use crate::errors::{AppError, AppResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Minimal string key-value store. One journal day is one key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store. Reads and writes can be switched to fail, which is how
/// the journal's fail-open behaviour is exercised.
#[derive(Debug, Default)]
pub struct MemoryKv {
    data: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.set(on);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.set(on);
    }

    /// Write directly, bypassing the failure switches.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(AppError::Other(format!("read of '{key}' refused")));
        }
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes.get() {
            return Err(AppError::Other(format!("write of '{key}' refused")));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
