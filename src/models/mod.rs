pub mod chart;
pub mod daily_state;
pub mod day_summary;
pub mod entry;
pub mod progress;

pub use chart::ChartData;
pub use daily_state::DailyState;
pub use day_summary::DaySummary;
pub use entry::{Entry, Macros, NewEntry};
pub use progress::Progress;
