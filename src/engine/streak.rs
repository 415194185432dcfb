use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::{days_between, DailyActivitySignal, DayKey, StreakState, StreakStatus};

/// A streak stays active while the last qualifying day is today or this many days back.
pub const GRACE_DAYS: i64 = 1;

fn default_at_risk_min_days() -> u32 {
    1
}

/// Tuning for the "at risk" warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// Shortest active run worth warning about when today is still unlogged.
    #[serde(default = "default_at_risk_min_days")]
    pub at_risk_min_days: u32,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            at_risk_min_days: default_at_risk_min_days(),
        }
    }
}

/// Reject histories that are out of order, repeat a day, or run past `today`.
pub fn validate_history(today: DayKey, history: &[DailyActivitySignal]) -> Result<()> {
    for (i, pair) in history.windows(2).enumerate() {
        let (prev, next) = (pair[0].day, pair[1].day);
        if next == prev {
            return Err(EngineError::history(i + 1, format!("duplicate day {}", next)));
        }
        if next < prev {
            return Err(EngineError::history(
                i + 1,
                format!("{} comes after {} (history must be ascending)", next, prev),
            ));
        }
    }
    if let Some(last) = history.last() {
        if last.day > today {
            return Err(EngineError::history(
                history.len() - 1,
                format!("{} is after today ({})", last.day, today),
            ));
        }
    }
    Ok(())
}

/// Derive the streak for one module.
///
/// `history` must be ascending by day with no repeats; missing days count as no
/// activity. `stored_best` is a persisted floor for `best_days` and is never lowered.
pub fn calculate_streak(
    today: DayKey,
    history: &[DailyActivitySignal],
    stored_best: Option<u32>,
) -> Result<StreakState> {
    validate_history(today, history)?;

    let floor = stored_best.unwrap_or(0);
    let longest = longest_run(history);

    let Some(last_idx) = history.iter().rposition(|s| s.has_activity) else {
        debug!("[streak] no activity in {} history rows", history.len());
        return Ok(StreakState::empty(floor.max(longest)));
    };
    let last_day = history[last_idx].day;

    if days_between(today, last_day) > GRACE_DAYS {
        debug!(
            "[streak] broken: last activity {} is {} days before {}",
            last_day,
            days_between(today, last_day),
            today
        );
        return Ok(StreakState {
            current_days: 0,
            best_days: floor.max(longest),
            status: StreakStatus::Broken,
            last_day_key: Some(last_day),
        });
    }

    let current = run_ending_at(history, last_idx);
    debug!(
        "[streak] active: {} days ending {}, longest in history {}",
        current, last_day, longest
    );

    Ok(StreakState {
        current_days: current,
        best_days: floor.max(longest).max(current),
        status: StreakStatus::Active,
        last_day_key: Some(last_day),
    })
}

/// Length of the contiguous active run that ends at `history[idx]`.
fn run_ending_at(history: &[DailyActivitySignal], idx: usize) -> u32 {
    let mut count = 1u32;
    let mut expected = history[idx].day;
    for signal in history[..idx].iter().rev() {
        if !signal.has_activity || days_between(expected, signal.day) != 1 {
            break;
        }
        count += 1;
        expected = signal.day;
    }
    count
}

/// Longest run of consecutive active calendar days anywhere in `history`.
pub fn longest_run(history: &[DailyActivitySignal]) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    let mut last_active: Option<DayKey> = None;

    for signal in history.iter().filter(|s| s.has_activity) {
        run = match last_active {
            Some(prev) if days_between(signal.day, prev) == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        last_active = Some(signal.day);
    }
    best
}

/// Number of days in `history` with activity.
pub fn active_days(history: &[DailyActivitySignal]) -> u32 {
    history.iter().filter(|s| s.has_activity).count() as u32
}

/// Active, today not logged yet, and long enough to be worth a nudge.
pub fn is_at_risk(state: &StreakState, today: DayKey, policy: &StreakPolicy) -> bool {
    match state.last_day_key {
        Some(last) if state.is_active() => {
            days_between(today, last) == GRACE_DAYS
                && state.current_days >= policy.at_risk_min_days.max(1)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn run(start: &str, len: i64) -> Vec<DailyActivitySignal> {
        let start = key(start);
        (0..len)
            .map(|i| DailyActivitySignal::from_count(start.add_days(i).unwrap(), 1))
            .collect()
    }

    fn today() -> DayKey {
        key("2024-06-10")
    }

    #[test]
    fn five_day_run_ending_today() {
        let history = run("2024-06-06", 5);
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 5);
        assert_eq!(state.status, StreakStatus::Active);
        assert_eq!(state.last_day_key, Some(key("2024-06-10")));
        assert_eq!(state.best_days, 5);
    }

    #[test]
    fn gap_of_two_days_breaks_but_raises_best() {
        let history = run("2024-06-01", 8);
        let state = calculate_streak(today(), &history, Some(5)).unwrap();
        assert_eq!(state.current_days, 0);
        assert_eq!(state.status, StreakStatus::Broken);
        assert_eq!(state.last_day_key, Some(key("2024-06-08")));
        assert_eq!(state.best_days, 8);
    }

    #[test]
    fn yesterday_keeps_streak_active() {
        let history = run("2024-06-07", 3);
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 3);
        assert_eq!(state.status, StreakStatus::Active);
        assert!(is_at_risk(&state, today(), &StreakPolicy::default()));
    }

    #[test]
    fn logged_today_is_not_at_risk() {
        let history = run("2024-06-08", 3);
        let state = calculate_streak(today(), &history, None).unwrap();
        assert!(!is_at_risk(&state, today(), &StreakPolicy::default()));
    }

    #[test]
    fn at_risk_threshold_is_configurable() {
        let history = run("2024-06-08", 2);
        let state = calculate_streak(today(), &history, None).unwrap();
        let policy = StreakPolicy { at_risk_min_days: 3 };
        assert!(!is_at_risk(&state, today(), &policy));
        let policy = StreakPolicy { at_risk_min_days: 2 };
        assert!(is_at_risk(&state, today(), &policy));
    }

    #[test]
    fn empty_history_is_zero_broken() {
        let state = calculate_streak(today(), &[], Some(4)).unwrap();
        assert_eq!(state, StreakState::empty(4));
        let state = calculate_streak(today(), &[], None).unwrap();
        assert_eq!(state, StreakState::empty(0));
    }

    #[test]
    fn inactive_rows_only_is_zero_broken() {
        let history: Vec<_> = (0..10)
            .map(|i| DailyActivitySignal::from_count(key("2024-06-01").add_days(i).unwrap(), 0))
            .collect();
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 0);
        assert_eq!(state.status, StreakStatus::Broken);
        assert_eq!(state.last_day_key, None);
    }

    #[test]
    fn inactive_row_today_does_not_hide_yesterday() {
        let mut history = run("2024-06-07", 3);
        history.push(DailyActivitySignal::from_count(today(), 0));
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 3);
        assert_eq!(state.last_day_key, Some(key("2024-06-09")));
    }

    #[test]
    fn explicit_inactive_day_splits_the_run() {
        let mut history = run("2024-06-03", 3);
        history.push(DailyActivitySignal::from_count(key("2024-06-06"), 0));
        history.extend(run("2024-06-07", 4));
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 4);
        assert_eq!(state.best_days, 4);
    }

    #[test]
    fn missing_day_splits_the_run() {
        let mut history = run("2024-05-20", 6);
        history.extend(run("2024-05-27", 2));
        history.extend(run("2024-06-09", 2));
        let state = calculate_streak(today(), &history, None).unwrap();
        assert_eq!(state.current_days, 2);
        assert_eq!(state.best_days, 6);
    }

    #[test]
    fn run_across_year_boundary() {
        let history = run("2023-12-29", 5);
        let state = calculate_streak(key("2024-01-02"), &history, None).unwrap();
        assert_eq!(state.current_days, 5);
    }

    #[test]
    fn rejects_unsorted_duplicate_and_future_history() {
        let mut unsorted = run("2024-06-01", 3);
        unsorted.swap(0, 2);
        assert!(matches!(
            calculate_streak(today(), &unsorted, None),
            Err(EngineError::InvalidHistory { index: 1, .. })
        ));

        let mut dup = run("2024-06-01", 3);
        dup.push(dup[2]);
        assert!(matches!(
            calculate_streak(today(), &dup, None),
            Err(EngineError::InvalidHistory { index: 3, .. })
        ));

        let future = run("2024-06-09", 3);
        assert!(matches!(
            calculate_streak(today(), &future, None),
            Err(EngineError::InvalidHistory { index: 2, .. })
        ));
    }

    #[test]
    fn stored_best_is_a_floor() {
        let history = run("2024-06-09", 2);
        let state = calculate_streak(today(), &history, Some(30)).unwrap();
        assert_eq!(state.current_days, 2);
        assert_eq!(state.best_days, 30);
    }

    #[test]
    fn contiguity_property() {
        for k in 1..=60 {
            for end_offset in [0, 1] {
                let end = today().add_days(-end_offset).unwrap();
                let start = end.add_days(-(k - 1)).unwrap();
                let history = run(&start.to_string(), k);
                let state = calculate_streak(today(), &history, None).unwrap();
                assert_eq!(state.current_days, k as u32, "k={k} end_offset={end_offset}");
                assert_eq!(state.status, StreakStatus::Active);
                assert!(state.best_days >= state.current_days);
            }
        }
    }

    #[test]
    fn break_detection_property() {
        for k in 1..=30 {
            for end_offset in 2..=10 {
                let end = today().add_days(-end_offset).unwrap();
                let start = end.add_days(-(k - 1)).unwrap();
                let history = run(&start.to_string(), k);
                let state = calculate_streak(today(), &history, None).unwrap();
                assert_eq!(state.current_days, 0);
                assert_eq!(state.status, StreakStatus::Broken);
                assert_eq!(state.best_days, k as u32);
            }
        }
    }

    #[test]
    fn best_is_monotonic_as_history_grows() {
        // Activity pattern with gaps: on every day except multiples of 4 and 9.
        let start = key("2024-01-01");
        let full: Vec<_> = (0..120)
            .filter(|i| i % 4 != 0 && i % 9 != 0)
            .map(|i| DailyActivitySignal::from_count(start.add_days(i).unwrap(), 1))
            .collect();

        for floor in [None, Some(2), Some(7)] {
            let mut previous_best = 0;
            for len in 0..=full.len() {
                let prefix = &full[..len];
                let today = prefix.last().map(|s| s.day).unwrap_or(start);
                let state = calculate_streak(today, prefix, floor).unwrap();
                assert!(state.best_days >= previous_best, "len={len}");
                assert!(state.best_days >= floor.unwrap_or(0));
                assert!(state.best_days >= state.current_days);
                previous_best = state.best_days;
            }
        }
    }

    #[test]
    fn idempotent() {
        let mut history = run("2024-05-01", 9);
        history.extend(run("2024-06-05", 6));
        let a = calculate_streak(today(), &history, Some(3)).unwrap();
        let b = calculate_streak(today(), &history, Some(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn longest_run_and_active_days() {
        let mut history = run("2024-05-01", 9);
        history.push(DailyActivitySignal::from_count(key("2024-05-10"), 0));
        history.extend(run("2024-05-11", 3));
        assert_eq!(longest_run(&history), 9);
        assert_eq!(active_days(&history), 12);
        assert_eq!(longest_run(&[]), 0);
    }
}
