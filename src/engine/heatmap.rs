use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::models::{DailyActivitySignal, DayKey, Heatmap, HeatmapCell, WEEK_LEN};

pub const DEFAULT_WEEKS: u32 = 5;

/// Minimum daily count needed for scores 1, 2 and 3.
///
/// Must be strictly increasing and start at 1 or more, so a zero count always
/// scores zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 3]", into = "[u32; 3]")]
pub struct ScoreBuckets([u32; 3]);

impl ScoreBuckets {
    pub fn new(thresholds: [u32; 3]) -> Result<Self> {
        let [a, b, c] = thresholds;
        if a == 0 {
            return Err(EngineError::InvalidBuckets(
                "first threshold must be at least 1".to_string(),
            ));
        }
        if !(a < b && b < c) {
            return Err(EngineError::InvalidBuckets(format!(
                "thresholds must be strictly increasing, got {:?}",
                thresholds
            )));
        }
        Ok(Self(thresholds))
    }

    pub fn thresholds(&self) -> [u32; 3] {
        self.0
    }

    pub fn score(&self, count: u32) -> u8 {
        self.0.iter().take_while(|t| count >= **t).count() as u8
    }
}

impl Default for ScoreBuckets {
    fn default() -> Self {
        Self([1, 2, 3])
    }
}

impl TryFrom<[u32; 3]> for ScoreBuckets {
    type Error = EngineError;

    fn try_from(value: [u32; 3]) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ScoreBuckets> for [u32; 3] {
    fn from(buckets: ScoreBuckets) -> Self {
        buckets.0
    }
}

/// Collapse signals into a day → count lookup. Days without activity keep their count.
pub fn counts_from_signals(signals: &[DailyActivitySignal]) -> BTreeMap<DayKey, u32> {
    signals.iter().map(|s| (s.day, s.count)).collect()
}

/// Build a `weeks * 7` grid ending at `today`. Missing days score 0.
pub fn build_heatmap(
    today: DayKey,
    weeks: u32,
    counts: &BTreeMap<DayKey, u32>,
    buckets: &ScoreBuckets,
) -> Result<Heatmap> {
    if weeks == 0 {
        return Err(EngineError::InvalidWeeks(weeks));
    }

    let total = i64::from(weeks) * WEEK_LEN as i64;
    let first = today.add_days(-(total - 1))?;

    let mut cells = Vec::with_capacity(total as usize);
    let mut day = first;
    for i in 0..total {
        if i > 0 {
            day = day.succ()?;
        }
        let count = counts.get(&day).copied().unwrap_or(0);
        cells.push(HeatmapCell {
            day,
            score: buckets.score(count),
        });
    }

    let heatmap = Heatmap { weeks, cells };
    debug!(
        "[heatmap] {} weeks {}..{} active_cells={}",
        weeks,
        first,
        today,
        heatmap.active_cells()
    );
    Ok(heatmap)
}
