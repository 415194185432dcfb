use serde::{Deserialize, Serialize};

use crate::models::DayKey;

/// Seven days ending today, oldest first.
pub const WEEK_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub day: DayKey,
    /// Quantized engagement, 0..=3.
    pub score: u8,
}

/// `weeks * 7` cells ending at the anchor day, oldest first, one row per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    pub weeks: u32,
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    pub fn rows(&self) -> impl Iterator<Item = &[HeatmapCell]> {
        self.cells.chunks(WEEK_LEN)
    }

    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.score > 0).count()
    }

    pub fn first_day(&self) -> Option<DayKey> {
        self.cells.first().map(|c| c.day)
    }

    pub fn last_day(&self) -> Option<DayKey> {
        self.cells.last().map(|c| c.day)
    }
}

/// Which of the last seven days (index 0 = six days ago, 6 = today) belong
/// to the running streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekIndicator(pub [bool; WEEK_LEN]);

impl WeekIndicator {
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|on| **on).count()
    }
}
