use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A source of daily activity. Each one gets its own independent streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedModule {
    Login,
    Food,
    Exercise,
    Medication,
    Water,
    Weight,
}

impl TrackedModule {
    pub fn all() -> Vec<TrackedModule> {
        vec![
            TrackedModule::Login,
            TrackedModule::Food,
            TrackedModule::Exercise,
            TrackedModule::Medication,
            TrackedModule::Water,
            TrackedModule::Weight,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedModule::Login => "login",
            TrackedModule::Food => "food",
            TrackedModule::Exercise => "exercise",
            TrackedModule::Medication => "medication",
            TrackedModule::Water => "water",
            TrackedModule::Weight => "weight",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrackedModule::Login => "Check-in",
            TrackedModule::Food => "Food",
            TrackedModule::Exercise => "Exercise",
            TrackedModule::Medication => "Medication",
            TrackedModule::Water => "Water",
            TrackedModule::Weight => "Weight",
        }
    }

    /// Whether a day with `count` entries counts toward this module's streak.
    pub fn qualifies(&self, count: i64, daily_minimum: u32) -> bool {
        count > 0 && count >= i64::from(daily_minimum)
    }
}

impl std::fmt::Display for TrackedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for TrackedModule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "login" | "checkin" | "check-in" => Ok(TrackedModule::Login),
            "food" | "meal" | "meals" => Ok(TrackedModule::Food),
            "exercise" | "workout" => Ok(TrackedModule::Exercise),
            "medication" | "meds" | "med" => Ok(TrackedModule::Medication),
            "water" => Ok(TrackedModule::Water),
            "weight" => Ok(TrackedModule::Weight),
            _ => Err(anyhow::anyhow!("Unknown module: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("meds".parse::<TrackedModule>().unwrap(), TrackedModule::Medication);
        assert_eq!("Food".parse::<TrackedModule>().unwrap(), TrackedModule::Food);
        assert!("sleep".parse::<TrackedModule>().is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for m in TrackedModule::all() {
            assert_eq!(m.as_str().parse::<TrackedModule>().unwrap(), m);
        }
    }

    #[test]
    fn qualifies_respects_minimum() {
        assert!(!TrackedModule::Water.qualifies(0, 0));
        assert!(TrackedModule::Water.qualifies(1, 0));
        assert!(!TrackedModule::Water.qualifies(5, 8));
        assert!(TrackedModule::Water.qualifies(8, 8));
    }
}
