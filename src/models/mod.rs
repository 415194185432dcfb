pub mod day_key;
pub mod heatmap;
pub mod module;
pub mod signal;
pub mod streak;

pub use day_key::{add_days, compare_days, days_between, DayKey};
pub use heatmap::{Heatmap, HeatmapCell, WeekIndicator, WEEK_LEN};
pub use module::TrackedModule;
pub use signal::DailyActivitySignal;
pub use streak::{StreakState, StreakStatus};
