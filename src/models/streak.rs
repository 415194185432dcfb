use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::DayKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakStatus {
    Active,
    Broken,
}

impl StreakStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakStatus::Active => "active",
            StreakStatus::Broken => "broken",
        }
    }
}

impl std::fmt::Display for StreakStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived streak for one module. Recomputed on every read.
///
/// Holds `best_days >= current_days`, `Broken => current_days == 0`, and
/// `last_day_key == None => current_days == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_days: u32,
    pub best_days: u32,
    pub status: StreakStatus,
    pub last_day_key: Option<DayKey>,
}

impl StreakState {
    /// Nothing ever logged.
    pub fn empty(best_days: u32) -> Self {
        Self {
            current_days: 0,
            best_days,
            status: StreakStatus::Broken,
            last_day_key: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StreakStatus::Active && self.current_days > 0
    }

    /// First day of the running streak, if there is one.
    pub fn start_day(&self) -> Result<Option<DayKey>> {
        match self.last_day_key {
            Some(last) if self.is_active() => {
                Ok(Some(last.add_days(-(i64::from(self.current_days) - 1))?))
            }
            _ => Ok(None),
        }
    }
}

impl Default for StreakState {
    fn default() -> Self {
        Self::empty(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_day_of_active_run() {
        let state = StreakState {
            current_days: 3,
            best_days: 3,
            status: StreakStatus::Active,
            last_day_key: Some("2024-03-01".parse().unwrap()),
        };
        assert_eq!(state.start_day().unwrap(), Some("2024-02-28".parse().unwrap()));
    }

    #[test]
    fn broken_state_has_no_start() {
        let state = StreakState {
            current_days: 0,
            best_days: 8,
            status: StreakStatus::Broken,
            last_day_key: Some("2024-06-08".parse().unwrap()),
        };
        assert_eq!(state.start_day().unwrap(), None);
        assert_eq!(StreakState::default().start_day().unwrap(), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&StreakStatus::Broken).unwrap(), "\"broken\"");
    }
}
