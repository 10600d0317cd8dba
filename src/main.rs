mod cli;
mod config;
mod db;
mod hydration;
mod models;
mod platform;
mod reminder;
mod session;
mod tui;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::repository::{MetaRepo, KEY_SETUP_DONE};
use platform::LocalPlatform;
use session::{Session, SessionOptions};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = db::open(&db_path)?;

    match cli.command {
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            let interval_secs = config.reminder.interval_secs;
            let mut session = open_session(conn, config);
            match cmd {
                Commands::Status => handlers::handle_status(&session)?,
                Commands::Drink { count } => handlers::handle_drink(&mut session, count)?,
                Commands::Reset => handlers::handle_reset(&mut session)?,
                Commands::Goal { activity } => {
                    handlers::handle_goal(&session, activity.as_deref())?
                }
                Commands::Stats { week } => handlers::handle_stats(&session, week)?,
                Commands::Remind => handlers::handle_remind(&mut session, interval_secs)?,
                Commands::Export { json } => handlers::handle_export(&session, json)?,
                Commands::Setup { .. } => unreachable!(),
            }
        }

        // No subcommand → launch TUI
        None => {
            ensure_setup(&conn, &mut config)?;
            let interval_secs = config.reminder.interval_secs;
            let session = open_session(conn, config);
            tui::app::run(session, interval_secs)?;
        }
    }

    Ok(())
}

fn open_session(conn: Connection, config: AppConfig) -> Session<LocalPlatform> {
    let options = SessionOptions {
        activity: config.hydration.activity,
        demo_data: config.hydration.demo_data,
    };
    let platform = LocalPlatform::new(conn, config);
    Session::open(platform, options, Local::now().date_naive())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, KEY_SETUP_DONE)?;
    if done.as_deref() != Some("1") {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
