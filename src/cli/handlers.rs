use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::Connection;
use std::str::FromStr;

use streakwise::engine::PersonalRecord;
use streakwise::models::{DayKey, StreakStatus, TrackedModule};

use crate::cli::report::{evaluate, ModuleReport};
use crate::config::AppConfig;
use crate::db::repository::ActivityRepo;
use crate::utils::format::{days, progress_bar, score_glyph, weekday_initial};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const RESET: &str = "\x1b[0m";

// ─── Input helpers ───────────────────────────────────────────────────────────

/// Resolve `--today`, falling back to the local calendar day.
pub fn resolve_today(arg: Option<&str>) -> Result<DayKey> {
    match arg {
        Some(s) => DayKey::from_str(s).with_context(|| format!("Parsing --today {:?}", s)),
        None => Ok(DayKey::from_date(Local::now().date_naive())),
    }
}

fn parse_module(s: &str) -> Result<TrackedModule> {
    TrackedModule::from_str(s).map_err(|_| {
        anyhow!(
            "Unknown module '{}'. Use: login, food, exercise, medication, water, weight",
            s
        )
    })
}

fn parse_day(arg: Option<&str>, today: DayKey) -> Result<DayKey> {
    match arg {
        Some(s) => Ok(DayKey::from_str(s).with_context(|| format!("Parsing date {:?}", s))?),
        None => Ok(today),
    }
}

/// Count this run as a login for `today`. Runs pinned to another day with
/// `--today` only read, so they record nothing.
pub fn record_login(conn: &Connection, config: &AppConfig, today: DayKey, pinned: bool) -> Result<bool> {
    if pinned || !config.tracking.record_logins {
        return Ok(false);
    }
    ActivityRepo::add(conn, TrackedModule::Login, today, 1)?;
    Ok(true)
}

// ─── Log ─────────────────────────────────────────────────────────────────────

pub fn handle_log(
    conn: &Connection,
    config: &AppConfig,
    today: DayKey,
    module_str: &str,
    count: u32,
    date: Option<&str>,
    set: bool,
) -> Result<()> {
    let module = parse_module(module_str)?;
    let day = parse_day(date, today)?;
    if day > today {
        return Err(anyhow!("Cannot log {} for {}: it is after today ({})", module, day, today));
    }

    let total = if set {
        ActivityRepo::set(conn, module, day, count)?;
        i64::from(count)
    } else {
        ActivityRepo::add(conn, module, day, count)?
    };

    let minimum = config.tracking.minimum_for(module);
    if module.qualifies(total, minimum) {
        println_colored!(GREEN, "  ✓ {} logged for {} (total {})", module, day, total);
    } else {
        println_colored!(
            AMBER,
            "  ◑ {} logged for {} (total {}, {} needed to count)",
            module,
            day,
            total,
            minimum.max(1)
        );
    }

    let report = evaluate(conn, config, module, today, None)?;
    print_streak_line(&report);
    Ok(())
}

pub fn handle_unlog(conn: &Connection, today: DayKey, module_str: &str, date: Option<&str>) -> Result<()> {
    let module = parse_module(module_str)?;
    let day = parse_day(date, today)?;
    if ActivityRepo::delete_day(conn, module, day)? {
        println_colored!(DIM, "  ○ {} cleared for {}", module, day);
    } else {
        println_colored!(DIM, "  Nothing logged for {} on {}", module, day);
    }
    Ok(())
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn handle_streak(
    conn: &Connection,
    config: &AppConfig,
    today: DayKey,
    module: Option<&str>,
) -> Result<()> {
    let modules = match module {
        Some(m) => vec![parse_module(m)?],
        None => TrackedModule::all(),
    };

    println!();
    for module in modules {
        let report = evaluate(conn, config, module, today, None)?;
        print_streak_detail(&report);
        println!();
    }
    Ok(())
}

fn print_streak_detail(report: &ModuleReport) {
    let state = &report.state;
    println_colored!(GOLD, "  {} {}", report.tier.emoji(), report.module);

    let bar = progress_bar(state.current_days, state.best_days.max(1), 12);
    match state.status {
        StreakStatus::Active => {
            println!(
                "  {}{}{}  {}{}{}",
                GREEN,
                bar,
                RESET,
                BOLD,
                days(state.current_days),
                RESET
            );
        }
        StreakStatus::Broken => {
            println_colored!(DIM, "  {}  no active streak", bar);
        }
    }

    let last = state
        .last_day_key
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never".to_string());
    println_colored!(
        DIM,
        "  Best: {}  ·  Active days: {}  ·  Last: {}",
        days(state.best_days),
        report.active_days,
        last
    );

    match report.record {
        PersonalRecord::NewRecord { .. } => println_colored!(GOLD, "  {}", report.record.text()),
        PersonalRecord::Tied { .. } => println_colored!(AMBER, "  {}", report.record.text()),
        PersonalRecord::BelowBest { .. } | PersonalRecord::NoRecord => {
            println_colored!(DIM, "  {}", report.record.text())
        }
    }
    if let Some(text) = &report.motivation {
        println_colored!(AMBER, "  {}", text);
    }
    if report.at_risk {
        println_colored!(RED, "  ⚠ Log {} today to keep your streak", report.module);
    }
}

fn print_streak_line(report: &ModuleReport) {
    let state = &report.state;
    let risk = if report.at_risk { " ⚠ at risk" } else { "" };
    println_colored!(
        DIM,
        "  {} {} streak: {} (best {}){}",
        report.tier.emoji(),
        report.module,
        days(state.current_days),
        state.best_days,
        risk
    );
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week(conn: &Connection, config: &AppConfig, today: DayKey, module_str: &str) -> Result<()> {
    let module = parse_module(module_str)?;
    let report = evaluate(conn, config, module, today, None)?;

    println!();
    println_colored!(GOLD, "  {} — last 7 days", module);
    println!();

    print!("  ");
    for i in 0..7i64 {
        let day = today.add_days(i - 6)?;
        print!("{}{}{}  ", DIM, weekday_initial(day), RESET);
    }
    println!();

    print!("  ");
    for on in report.week.iter() {
        if on {
            print!("{}●{}  ", GREEN, RESET);
        } else {
            print!("{}○{}  ", DIM, RESET);
        }
    }
    println!();
    println!();
    print_streak_line(&report);
    println!();
    Ok(())
}

// ─── Heatmap ─────────────────────────────────────────────────────────────────

pub fn handle_heatmap(
    conn: &Connection,
    config: &AppConfig,
    today: DayKey,
    module_str: &str,
    weeks: Option<u32>,
) -> Result<()> {
    let module = parse_module(module_str)?;
    let report = evaluate(conn, config, module, today, weeks)?;
    let heatmap = &report.heatmap;

    println!();
    println_colored!(
        GOLD,
        "  {} — last {} weeks",
        module,
        heatmap.weeks
    );
    let [t1, t2, t3] = config.heatmap.buckets_for(module).thresholds();
    println_colored!(
        DIM,
        "  (· = 0, ░ = {}+, ▒ = {}+, █ = {}+)",
        t1,
        t2,
        t3
    );
    println!();

    for row in heatmap.rows() {
        let start = row.first().map(|c| c.day.to_string()).unwrap_or_default();
        print!("  {}{}{}  ", DIM, start, RESET);
        for cell in row {
            let color = match cell.score {
                0 => DIM,
                1 | 2 => AMBER,
                _ => GREEN,
            };
            print!("{}{}{} ", color, score_glyph(cell.score), RESET);
        }
        println!();
    }

    println!();
    println_colored!(
        DIM,
        "  {} of {} days logged",
        heatmap.active_cells(),
        heatmap.cells.len()
    );
    println!();
    Ok(())
}

// ─── Summary ─────────────────────────────────────────────────────────────────

pub fn handle_summary(conn: &Connection, config: &AppConfig, today: DayKey) -> Result<()> {
    println!();
    println_colored!(GOLD, "  Streaks — {}", today);
    println!();
    for module in TrackedModule::all() {
        let report = evaluate(conn, config, module, today, None)?;
        let dots: String = report
            .week
            .iter()
            .map(|on| if on { '●' } else { '○' })
            .collect();
        let color = if report.at_risk {
            AMBER
        } else if report.state.is_active() {
            GREEN
        } else {
            DIM
        };
        println_colored!(
            color,
            "  {:<12} {}  {:>8}  best {:>3}  {}",
            module.display_name(),
            dots,
            days(report.state.current_days),
            report.state.best_days,
            report.tier.emoji()
        );
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig, today: DayKey, json: bool) -> Result<()> {
    let reports = TrackedModule::all()
        .into_iter()
        .map(|m| evaluate(conn, config, m, today, None))
        .collect::<Result<Vec<_>>>()?;

    if json {
        let out = serde_json::to_string_pretty(&reports).context("Serializing export")?;
        println!("{}", out);
        return Ok(());
    }

    println!("# streakwise — Summary");
    println!("# {}", today);
    println!();
    for report in &reports {
        let state = &report.state;
        let week: String = report
            .week
            .iter()
            .map(|on| if on { '█' } else { '░' })
            .collect();
        println!("## {}", report.module);
        println!("  Streak:   {} ({})", days(state.current_days), state.status);
        println!("  Best:     {}", days(state.best_days));
        println!("  Week:     {}", week);
        println!(
            "  Heatmap:  {}/{} days over {} weeks",
            report.heatmap.active_cells(),
            report.heatmap.cells.len(),
            report.heatmap.weeks
        );
        println!("  Record:   {}", report.record.text());
        println!();
    }
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        if path.exists() {
            println_colored!(DIM, "  Config already exists at {:?}", path);
        } else {
            let written = config.save()?;
            println_colored!(GREEN, "  ✓ Wrote default config to {:?}", written);
        }
        return Ok(());
    }

    println_colored!(DIM, "# {:?}", path);
    let content = toml::to_string_pretty(config).context("Serializing config")?;
    println!("{}", content);
    Ok(())
}
