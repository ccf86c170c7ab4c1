use crate::models::Entry;
use crate::store::{Clock, JournalStore, KeyValueStore};

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove `id` from today's journal; returns the removed entry, or `None`
    /// when today has no such entry.
    pub fn apply<K: KeyValueStore, C: Clock>(
        store: &mut JournalStore<K, C>,
        id: &str,
    ) -> Option<Entry> {
        store.refresh();
        let target = store.entries().iter().find(|e| e.id == id).cloned();
        if store.remove_entry(id) { target } else { None }
    }
}
