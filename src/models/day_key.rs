use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{EngineError, Result};

/// One local calendar day, `YYYY-MM-DD`.
///
/// Equality and ordering come from the (year, month, day) triple only. There is no
/// time-of-day or offset inside, so arithmetic never drifts across DST changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DayKey)
            .ok_or_else(|| EngineError::InvalidDateKey(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Shift by `n` whole days (negative goes back).
    pub fn add_days(self, n: i64) -> Result<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        shifted
            .map(DayKey)
            .ok_or_else(|| EngineError::InvalidDateKey(format!("{} {:+} days", self, n)))
    }

    /// Whole days from `other` to `self`; positive when `self` is later.
    pub fn days_since(self, other: DayKey) -> i64 {
        (self.0 - other.0).num_days()
    }

    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }
}

/// `key + n` days.
pub fn add_days(key: DayKey, n: i64) -> Result<DayKey> {
    key.add_days(n)
}

/// -1, 0 or 1 as `a` is before, equal to or after `b`.
pub fn compare_days(a: DayKey, b: DayKey) -> i8 {
    match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// `a - b` in days. `days_between(today, yesterday) == 1`.
pub fn days_between(a: DayKey, b: DayKey) -> i64 {
    a.days_since(b)
}

impl FromStr for DayKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || EngineError::InvalidDateKey(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(bad());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(bad());
        }
        let year: i32 = s[0..4].parse().map_err(|_| bad())?;
        let month: u32 = s[5..7].parse().map_err(|_| bad())?;
        let day: u32 = s[8..10].parse().map_err(|_| bad())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DayKey)
            .ok_or_else(bad)
    }
}

impl TryFrom<String> for DayKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
