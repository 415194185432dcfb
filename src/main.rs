mod cli;
mod config;
mod db;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use streakwise::models::DayKey;

fn open_database(config: &AppConfig, today: DayKey, pinned: bool) -> Result<Connection> {
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;
    handlers::record_login(&conn, config, today, pinned)?;
    Ok(conn)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;
    let today = handlers::resolve_today(cli.today.as_deref())?;
    let pinned = cli.today.is_some();
    let open = || open_database(&config, today, pinned);

    match cli.command {
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }
        Some(Commands::Log {
            module,
            count,
            date,
            set,
        }) => {
            handlers::handle_log(&open()?, &config, today, &module, count, date.as_deref(), set)?;
        }
        Some(Commands::Unlog { module, date }) => {
            handlers::handle_unlog(&open()?, today, &module, date.as_deref())?;
        }
        Some(Commands::Streak { module }) => {
            handlers::handle_streak(&open()?, &config, today, module.as_deref())?;
        }
        Some(Commands::Week { module }) => {
            handlers::handle_week(&open()?, &config, today, &module)?;
        }
        Some(Commands::Heatmap { module, weeks }) => {
            handlers::handle_heatmap(&open()?, &config, today, &module, weeks)?;
        }
        Some(Commands::Export { json }) => {
            handlers::handle_export(&open()?, &config, today, json)?;
        }
        Some(Commands::Summary) | None => {
            handlers::handle_summary(&open()?, &config, today)?;
        }
    }

    Ok(())
}
