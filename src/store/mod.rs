//! Journal store and its injected collaborators.

pub mod clock;
pub mod day_key;
pub mod journal;
pub mod kv;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day_key::{day_key, parse_day_key};
pub use journal::{JournalSettings, JournalStore, load_day};
pub use kv::{KeyValueStore, MemoryKv};
