use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::DayKey;

/// One day of one tracked module, already classified upstream.
///
/// `has_activity` is usually `count > 0` but is passed explicitly so the
/// qualifying policy stays with whoever builds the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivitySignal {
    pub day: DayKey,
    pub has_activity: bool,
    pub count: u32,
}

impl DailyActivitySignal {
    pub fn new(day: DayKey, has_activity: bool, count: u32) -> Self {
        Self {
            day,
            has_activity,
            count,
        }
    }

    /// Signal where activity means "logged at least once".
    pub fn from_count(day: DayKey, count: u32) -> Self {
        Self::new(day, count > 0, count)
    }

    /// Build from storage-shaped values. Negative counts are rejected, not clamped.
    pub fn from_raw(index: usize, day: &str, has_activity: bool, count: i64) -> Result<Self> {
        let day: DayKey = day.parse()?;
        let count = u32::try_from(count).map_err(|_| {
            EngineError::history(index, format!("count {} on {} is out of range", count, day))
        })?;
        Ok(Self::new(day, has_activity, count))
    }
}
