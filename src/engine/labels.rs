use serde::{Deserialize, Serialize};

use crate::models::StreakState;

pub const DEFAULT_MOTIVATION_GAP: u32 = 2;

/// How the running streak compares with the best it has to beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PersonalRecord {
    /// Nothing running and nothing to beat.
    NoRecord,
    NewRecord { days: u32 },
    Tied { days: u32 },
    BelowBest { current: u32, best: u32 },
}

impl PersonalRecord {
    /// `best_to_beat` is the best as it stood before the running streak could
    /// have raised it, usually the persisted value.
    pub fn evaluate(state: &StreakState, best_to_beat: u32) -> Self {
        let current = state.current_days;
        if current == 0 && best_to_beat == 0 {
            return PersonalRecord::NoRecord;
        }
        match current.cmp(&best_to_beat) {
            std::cmp::Ordering::Greater => PersonalRecord::NewRecord { days: current },
            std::cmp::Ordering::Equal => PersonalRecord::Tied { days: current },
            std::cmp::Ordering::Less => PersonalRecord::BelowBest {
                current,
                best: best_to_beat,
            },
        }
    }

    pub fn text(&self) -> String {
        match self {
            PersonalRecord::NoRecord => "No record yet".to_string(),
            PersonalRecord::NewRecord { days } => format!("New PR! {} days", days),
            PersonalRecord::Tied { days } => format!("Tied your PR of {} days", days),
            PersonalRecord::BelowBest { best, .. } => format!("PR: {} days", best),
        }
    }
}

/// "N days to beat your best", only when an active streak is within `gap` days of it.
pub fn motivation_text(state: &StreakState, best_to_beat: u32, gap: u32) -> Option<String> {
    let current = state.current_days;
    if !state.is_active() || current >= best_to_beat {
        return None;
    }
    let behind = best_to_beat - current;
    if behind > gap {
        return None;
    }
    let to_beat = behind + 1;
    let unit = if to_beat == 1 { "day" } else { "days" };
    Some(format!(
        "{} more {} to beat your best of {}!",
        to_beat, unit, best_to_beat
    ))
}

/// Intensity tier for the running streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    Neutral,
    Spark,
    Flame,
    Blaze,
    Legend,
}

impl StreakTier {
    pub fn for_days(days: u32) -> Self {
        match days {
            0..=1 => StreakTier::Neutral,
            2..=6 => StreakTier::Spark,
            7..=13 => StreakTier::Flame,
            14..=29 => StreakTier::Blaze,
            _ => StreakTier::Legend,
        }
    }

    pub fn from_state(state: &StreakState) -> Self {
        Self::for_days(state.current_days)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            StreakTier::Neutral => "🌱",
            StreakTier::Spark => "✨",
            StreakTier::Flame => "🔥",
            StreakTier::Blaze => "🔥🔥",
            StreakTier::Legend => "🏆",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StreakTier::Neutral => "getting started",
            StreakTier::Spark => "spark",
            StreakTier::Flame => "on fire",
            StreakTier::Blaze => "blazing",
            StreakTier::Legend => "legendary",
        }
    }
}
