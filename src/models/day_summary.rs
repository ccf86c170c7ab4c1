use crate::models::DailyState;
use chrono::NaiveDate;
use serde::Serialize;

/// One line of the journal history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub entries: usize,
    pub total_kcal: u64,
    pub limit: u32,
}

impl DaySummary {
    pub fn from_state(date: NaiveDate, state: &DailyState) -> Self {
        Self {
            date,
            entries: state.entries.len(),
            total_kcal: state.total_kcal(),
            limit: state.limit,
        }
    }

    pub fn over_limit(&self) -> bool {
        self.total_kcal > u64::from(self.limit)
    }
}
