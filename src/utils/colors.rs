/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Color of the intake bar:
/// below 80% → cyan
/// 80–100% → yellow
/// over the limit → red
pub fn color_for_progress(percent: f64, over_limit: bool) -> &'static str {
    if over_limit {
        RED
    } else if percent >= 80.0 {
        YELLOW
    } else {
        CYAN
    }
}

/// Remaining kcal: green while there is room, red once exceeded.
pub fn color_for_remaining(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}
