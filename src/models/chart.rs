use super::daily_state::DailyState;
use serde::Serialize;

pub const START_LABEL: &str = "Start";
pub const EMPTY_LABEL: &str = "No data";

/// Cumulative intake series. `labels`, `values` and `limit` always have the
/// same, non-zero length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Daily limit repeated for every point, drawn as a flat reference line.
    pub limit: Vec<u32>,
}

impl ChartData {
    /// Build the series from a day: a synthetic `Start` point at 0, then one
    /// point per entry in timestamp order carrying the running total.
    pub fn from_state(state: &DailyState) -> Self {
        if state.entries.is_empty() {
            return Self {
                labels: vec![EMPTY_LABEL.to_string()],
                values: vec![0],
                limit: vec![state.limit],
            };
        }

        let sorted = state.chronological();
        let mut labels = Vec::with_capacity(sorted.len() + 1);
        let mut values = Vec::with_capacity(sorted.len() + 1);

        labels.push(START_LABEL.to_string());
        values.push(0);

        let mut cumulative = 0u64;
        for entry in sorted {
            cumulative += u64::from(entry.kcal);
            labels.push(entry.clock_label());
            values.push(cumulative);
        }

        let limit = vec![state.limit; labels.len()];
        Self {
            labels,
            values,
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label/value pairs, convenient for rendering.
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn peak(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}
