use serde::Serialize;

/// Intake measured against the daily limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub consumed: u64,
    pub limit: u32,
    /// `consumed / limit`, unclamped.
    pub ratio: f64,
    /// Fill level of a progress bar, clamped to 0..=100.
    pub percent: f64,
    pub over_limit: bool,
    pub goal_reached: bool,
}

impl Progress {
    pub fn new(consumed: u64, limit: u32) -> Self {
        let ratio = if limit == 0 {
            0.0
        } else {
            consumed as f64 / f64::from(limit)
        };

        Self {
            consumed,
            limit,
            ratio,
            percent: (ratio * 100.0).clamp(0.0, 100.0),
            over_limit: consumed > u64::from(limit),
            goal_reached: limit > 0 && consumed >= u64::from(limit),
        }
    }

    pub fn remaining(&self) -> i64 {
        i64::from(self.limit) - self.consumed as i64
    }
}
