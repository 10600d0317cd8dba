use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use rusqlite::Connection;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::mpsc;

use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, KEY_SETUP_DONE};
use crate::hydration::goal::compute_goal;
use crate::models::{
    ActivityLevel, DayRecord, HydrationGoal, LocationSnapshot, Summary, WeatherSnapshot,
};
use crate::platform::{LocalPlatform, Platform};
use crate::reminder::{Reminder, ReminderEvent, ReminderOutcome, ThreadScheduler};
use crate::session::{AddOutcome, Session, NOTIFY_BODY, NOTIFY_TITLE};
use crate::utils::format::{
    format_countdown, format_delta, format_duration_secs, progress_bar, weekday_label,
};

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
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const AQUA: &str = "\x1b[38;2;86;182;214m";

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(
    conn: &Connection,
    config: &mut AppConfig,
    reset: bool,
) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, KEY_SETUP_DONE)? {
            if done == "1" {
                println!("hydroflow is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }
    crate::cli::setup_tui::run_setup_tui(conn, config)
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(session: &Session<LocalPlatform>) -> Result<()> {
    let goal = session.goal();
    let weather = session.weather();

    println!();
    println_colored!(
        AQUA,
        "  Hydration — {} ({})",
        session.location().display_name(),
        session.today_key()
    );
    println!();

    let count = session.water_count();
    let style = if count >= goal.adjusted_goal { GREEN } else { BOLD };
    println_colored!(
        style,
        "  Today:     {} / {} glasses  {}  {}%",
        count,
        goal.adjusted_goal,
        progress_bar(count, goal.adjusted_goal, 16),
        session.progress()
    );
    println!(
        "  Weather:   {:.0}°C (feels {:.0}°C), {:.0}% humidity, {}",
        weather.temperature, weather.feels_like, weather.humidity, weather.condition
    );
    if session.using_fallback() {
        if session.platform().config().has_coordinates() {
            println_colored!(DIM, "             default conditions; weather lookup unavailable");
        } else {
            println_colored!(DIM, "             default conditions; run `hydroflow setup` to add coordinates");
        }
    }
    println!();
    println_colored!(DIM, "  {}", goal.recommendation);
    println!();
    Ok(())
}

// ─── Drink / reset ───────────────────────────────────────────────────────────

pub fn handle_drink<P: Platform>(session: &mut Session<P>, count: u32) -> Result<()> {
    if count == 0 {
        return Err(anyhow!("Glass count must be at least 1"));
    }
    let outcome = session.add_glasses(count)?;
    let goal = session.goal().adjusted_goal;
    match outcome {
        AddOutcome::GoalReached { count } => {
            println_colored!(
                GREEN,
                "  🎉 Goal achieved! {}/{} glasses — 100 points earned today",
                count,
                goal
            );
        }
        AddOutcome::Added { count } => {
            println_colored!(
                AQUA,
                "  💧 Great job! {} glass{} of water today ({}/{})",
                count,
                if count == 1 { "" } else { "es" },
                count,
                goal
            );
        }
    }
    let summary = session.summary();
    println_colored!(
        DIM,
        "  Points (7d): {}  ·  Streak: {} days",
        summary.total_points,
        summary.streak
    );
    Ok(())
}

pub fn handle_reset<P: Platform>(session: &mut Session<P>) -> Result<()> {
    session.reset_day()?;
    println_colored!(AMBER, "  🔄 Today's water counter has been reset");
    Ok(())
}

// ─── Goal ────────────────────────────────────────────────────────────────────

pub fn handle_goal<P: Platform>(session: &Session<P>, activity: Option<&str>) -> Result<()> {
    let level = match activity {
        Some(s) => ActivityLevel::from_str(s)
            .map_err(|_| anyhow!("Unknown activity '{}'. Use: low, moderate, high", s))?,
        None => session.activity(),
    };
    let goal = compute_goal(session.weather(), session.location(), level);

    println!();
    println_colored!(AQUA, "  Daily Goal — {} activity", level.display_name());
    println!();
    print_goal_breakdown(&goal);
    println!();
    println_colored!(DIM, "  {}", goal.recommendation);
    println!();
    Ok(())
}

fn print_goal_breakdown(goal: &HydrationGoal) {
    let rows = [
        ("Temperature", goal.factors.temperature),
        ("Humidity", goal.factors.humidity),
        ("Climate", goal.factors.climate),
        ("Activity", goal.factors.activity),
    ];
    println!("  {:<12}  {:>3}", "Base", goal.base_goal);
    for (name, delta) in &rows {
        let color = match delta {
            d if *d > 0 => AMBER,
            d if *d < 0 => AQUA,
            _ => DIM,
        };
        println_colored!(color, "  {:<12}  {:>3}", name, format_delta(*delta));
    }
    println_colored!(BOLD, "  {:<12}  {:>3} glasses", "Goal", goal.adjusted_goal);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats<P: Platform>(session: &Session<P>, week: bool) -> Result<()> {
    let summary = session.summary();
    let met = session.week().iter().filter(|d| d.goal_met).count();

    println!();
    println_colored!(AQUA, "  Statistics");
    println!();
    println_colored!(BOLD, "  Points (7d):  {}", summary.total_points);
    if summary.streak > 0 {
        println_colored!(GREEN, "  Streak:       {} days", summary.streak);
    } else {
        println_colored!(AMBER, "  Streak:       0 days");
    }
    println!("  Goal met:     {}/{} days", met, session.week().len());
    println!("  Today:        {}%", session.progress());

    if week {
        println!();
        println_colored!(DIM, "  Last 7 days  (█ = glasses, ✓ = goal met)");
        println!();
        for day in session.week() {
            let mark = if day.goal_met {
                format!("{}✓\x1b[0m", GREEN)
            } else {
                " ".to_string()
            };
            println!(
                "  {} {}  {}  {:>2}/{:<2} {}",
                weekday_label(&day.date),
                day.date,
                progress_bar(day.water_count, day.goal, 12),
                day.water_count,
                day.goal,
                mark
            );
        }
    }

    println!();
    Ok(())
}

// ─── Remind ──────────────────────────────────────────────────────────────────

pub fn handle_remind<P: Platform>(session: &mut Session<P>, interval_secs: u64) -> Result<()> {
    let (tx, rx) = mpsc::channel::<ReminderEvent>();
    let mut reminder = Reminder::new(ThreadScheduler::new(tx), interval_secs);
    reminder.start();

    println_colored!(
        AQUA,
        "  ⏰ Reminders started — every {}. Press Ctrl-C to stop.",
        format_duration_secs(reminder.interval_secs() as i64)
    );
    println!();

    while let Ok(event) = rx.recv() {
        match reminder.handle(event) {
            Some(ReminderOutcome::Ticked) => {
                print!(
                    "\r  Next reminder in {}   ",
                    format_countdown(reminder.remaining_secs())
                );
                io::stdout().flush()?;
            }
            Some(ReminderOutcome::Notify) => {
                println!();
                println_colored!(BOLD, "  {}", NOTIFY_TITLE);
                println_colored!(DIM, "  {}", NOTIFY_BODY);
                if let Err(e) = session.notify() {
                    log::warn!("Notification failed: {}", e);
                }
            }
            None => {}
        }
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ExportReport<'a> {
    date: String,
    location: &'a LocationSnapshot,
    weather: &'a WeatherSnapshot,
    activity: ActivityLevel,
    goal: &'a HydrationGoal,
    summary: Summary,
    week: &'a [DayRecord],
}

pub fn handle_export(session: &Session<LocalPlatform>, json: bool) -> Result<()> {
    if json {
        let report = ExportReport {
            date: session.today_key(),
            location: session.location(),
            weather: session.weather(),
            activity: session.activity(),
            goal: session.goal(),
            summary: session.summary(),
            week: session.week(),
        };
        let out = serde_json::to_string_pretty(&report).context("Serializing export")?;
        println!("{}", out);
        return Ok(());
    }

    let summary = session.summary();
    let goal = session.goal();
    let config = session.platform().config();

    println!("# hydroflow — Weekly Summary");
    println!("# {}", session.today_key());
    println!();
    println!("Location: {}", session.location().display_name());
    println!("Activity: {}", session.activity().display_name());
    println!("Goal:     {} glasses", goal.adjusted_goal);
    println!(
        "Reminder: every {}",
        format_duration_secs(config.reminder.interval_secs as i64)
    );
    println!();
    println!("## Water Intake (last 7 days)");
    for day in session.week() {
        println!(
            "  {}  {:>2}/{:<2}  {}  {:>3} pts{}",
            day.date,
            day.water_count,
            day.goal,
            progress_bar(day.water_count, day.goal, 8),
            day.points,
            if day.goal_met { "  ✓" } else { "" }
        );
    }
    println!();
    println!("## Summary");
    println!("  Points:   {}", summary.total_points);
    println!("  Streak:   {} days", summary.streak);
    println!(
        "  Goal met: {}/{} days",
        session.week().iter().filter(|d| d.goal_met).count(),
        session.week().len()
    );
    Ok(())
}
