use super::entry::{Entry, lenient_u32};
use crate::config::DEFAULT_DAILY_LIMIT;
use serde::{Deserialize, Deserializer, Serialize};

/// The persisted unit: one record per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyState {
    /// A missing, zero or unreadable limit loads as the default; the entries
    /// are kept.
    #[serde(default = "default_limit", deserialize_with = "lenient_limit")]
    pub limit: u32,
    /// Newest first.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

fn default_limit() -> u32 {
    DEFAULT_DAILY_LIMIT
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = lenient_u32(deserializer)?;
    Ok(if limit == 0 { DEFAULT_DAILY_LIMIT } else { limit })
}

impl DailyState {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            entries: Vec::new(),
        }
    }

    pub fn total_kcal(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.kcal)).sum()
    }

    /// Entries sorted by timestamp, oldest first.
    pub fn chronological(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);
        sorted
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
