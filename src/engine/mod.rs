//! Streak, week-indicator and heatmap computation over daily activity signals.
//!
//! Everything here is a pure function of its arguments: no I/O, no clocks, no
//! shared state. Callers pass `today` explicitly and persist `best_days` themselves.

pub mod heatmap;
pub mod labels;
pub mod streak;
pub mod week;

pub use heatmap::{build_heatmap, counts_from_signals, ScoreBuckets, DEFAULT_WEEKS};
pub use labels::{motivation_text, PersonalRecord, StreakTier, DEFAULT_MOTIVATION_GAP};
pub use streak::{
    active_days, calculate_streak, is_at_risk, longest_run, validate_history, StreakPolicy,
};
pub use week::week_indicator;
