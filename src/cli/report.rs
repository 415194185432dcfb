use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

use streakwise::engine::{
    active_days, build_heatmap, calculate_streak, counts_from_signals, is_at_risk, longest_run,
    motivation_text, week_indicator, PersonalRecord, StreakTier,
};
use streakwise::models::{DailyActivitySignal, DayKey, Heatmap, StreakState, TrackedModule, WeekIndicator};

use crate::config::AppConfig;
use crate::db::repository::{ActivityRepo, BestRecord, BestRepo};

/// Everything the terminal views need for one module on one day.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub module: TrackedModule,
    pub today: DayKey,
    pub state: StreakState,
    pub best_to_beat: u32,
    pub at_risk: bool,
    pub active_days: u32,
    pub record: PersonalRecord,
    pub motivation: Option<String>,
    pub tier: StreakTier,
    pub week: WeekIndicator,
    pub heatmap: Heatmap,
}

/// Load history, run the engine, and persist any raised best.
pub fn evaluate(
    conn: &Connection,
    config: &AppConfig,
    module: TrackedModule,
    today: DayKey,
    weeks: Option<u32>,
) -> Result<ModuleReport> {
    let history = ActivityRepo::history(conn, module, config.tracking.minimum_for(module), today)
        .with_context(|| format!("Loading {} history", module.as_str()))?;
    let stored = BestRepo::get(conn, module)?;

    let state = calculate_streak(today, &history, stored.map(|r| r.best_days))
        .with_context(|| format!("Computing {} streak", module.as_str()))?;

    let best_to_beat = match stored {
        Some(r) if r.baseline_date == today => r.baseline_days,
        Some(r) => r.best_days,
        None => best_before_current_run(&history, &state)?,
    };

    let record = BestRecord {
        best_days: state.best_days,
        baseline_days: best_to_beat,
        baseline_date: today,
    };
    if stored != Some(record) {
        BestRepo::save(conn, module, &record)?;
    }

    let weeks = weeks.unwrap_or(config.heatmap.weeks);
    let heatmap = build_heatmap(
        today,
        weeks,
        &counts_from_signals(&history),
        &config.heatmap.buckets_for(module),
    )?;

    let report = ModuleReport {
        module,
        today,
        state,
        best_to_beat,
        at_risk: is_at_risk(&state, today, &config.streak),
        active_days: active_days(&history),
        record: PersonalRecord::evaluate(&state, best_to_beat),
        motivation: motivation_text(&state, best_to_beat, config.labels.motivation_gap),
        tier: StreakTier::from_state(&state),
        week: week_indicator(today, &state)?,
        heatmap,
    };

    info!(
        "[streak] evaluate module={} today={} current={} best={} status={} at_risk={}",
        module.as_str(),
        today,
        report.state.current_days,
        report.state.best_days,
        report.state.status,
        report.at_risk
    );
    Ok(report)
}

/// Longest run that finished before the running streak started.
fn best_before_current_run(history: &[DailyActivitySignal], state: &StreakState) -> Result<u32> {
    match state.start_day()? {
        Some(start) => {
            let cut = history.partition_point(|s| s.day < start);
            Ok(longest_run(&history[..cut]))
        }
        None => Ok(state.best_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn log_run(conn: &Connection, module: TrackedModule, start: &str, len: i64) {
        let start = key(start);
        for i in 0..len {
            ActivityRepo::add(conn, module, start.add_days(i).unwrap(), 1).unwrap();
        }
    }

    #[test]
    fn first_read_compares_against_earlier_runs() {
        let conn = conn();
        let config = AppConfig::default();
        log_run(&conn, TrackedModule::Food, "2024-05-01", 10);
        log_run(&conn, TrackedModule::Food, "2024-06-01", 10);

        let report = evaluate(&conn, &config, TrackedModule::Food, key("2024-06-10"), None).unwrap();
        assert_eq!(report.state.current_days, 10);
        assert_eq!(report.best_to_beat, 10);
        assert_eq!(report.record, PersonalRecord::Tied { days: 10 });

        let saved = BestRepo::get(&conn, TrackedModule::Food).unwrap().unwrap();
        assert_eq!(saved.best_days, 10);
    }

    #[test]
    fn new_record_holds_for_the_whole_day() {
        let conn = conn();
        let config = AppConfig::default();
        log_run(&conn, TrackedModule::Medication, "2024-06-01", 10);
        let day10 = key("2024-06-10");
        evaluate(&conn, &config, TrackedModule::Medication, day10, None).unwrap();

        ActivityRepo::add(&conn, TrackedModule::Medication, key("2024-06-11"), 1).unwrap();
        let day11 = key("2024-06-11");
        for _ in 0..2 {
            let report = evaluate(&conn, &config, TrackedModule::Medication, day11, None).unwrap();
            assert_eq!(report.state.current_days, 11);
            assert_eq!(report.state.best_days, 11);
            assert_eq!(report.record, PersonalRecord::NewRecord { days: 11 });
        }
    }

    #[test]
    fn broken_streak_keeps_best_and_empty_week() {
        let conn = conn();
        let config = AppConfig::default();
        log_run(&conn, TrackedModule::Exercise, "2024-06-01", 8);
        BestRepo::save(
            &conn,
            TrackedModule::Exercise,
            &BestRecord { best_days: 5, baseline_days: 5, baseline_date: key("2024-06-01") },
        )
        .unwrap();

        let report = evaluate(&conn, &config, TrackedModule::Exercise, key("2024-06-10"), None).unwrap();
        assert_eq!(report.state.current_days, 0);
        assert_eq!(report.state.best_days, 8);
        assert_eq!(report.week.filled(), 0);
        assert!(!report.at_risk);
        assert_eq!(BestRepo::get(&conn, TrackedModule::Exercise).unwrap().unwrap().best_days, 8);
    }

    #[test]
    fn no_data_is_safe() {
        let conn = conn();
        let config = AppConfig::default();
        let report = evaluate(&conn, &config, TrackedModule::Weight, key("2024-06-10"), Some(3)).unwrap();
        assert_eq!(report.state, StreakState::empty(0));
        assert_eq!(report.week.filled(), 0);
        assert_eq!(report.heatmap.cells.len(), 21);
        assert_eq!(report.heatmap.active_cells(), 0);
        assert_eq!(report.record, PersonalRecord::NoRecord);
    }

    #[test]
    fn daily_minimum_changes_classification() {
        let conn = conn();
        let mut config = AppConfig::default();
        config.tracking.daily_minimum.insert("water".to_string(), 3);
        let today = key("2024-06-10");
        ActivityRepo::set(&conn, TrackedModule::Water, key("2024-06-09"), 4).unwrap();
        ActivityRepo::set(&conn, TrackedModule::Water, today, 2).unwrap();

        let report = evaluate(&conn, &config, TrackedModule::Water, today, None).unwrap();
        assert_eq!(report.state.current_days, 1);
        assert_eq!(report.state.last_day_key, Some(key("2024-06-09")));
        assert!(report.at_risk);
        assert_eq!(report.heatmap.cells.last().unwrap().score, 2);
    }
}
