use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::hydration::WINDOW_DAYS;
use crate::models::{DayRecord, SavedState};

pub const KEY_TOTAL_POINTS: &str = "total_points";
pub const KEY_STREAK: &str = "streak";
pub const KEY_SETUP_DONE: &str = "setup_done";

// ─── Day records ─────────────────────────────────────────────────────────────

pub struct DayRepo;

impl DayRepo {
    /// The stored window, oldest first.
    pub fn get_week(conn: &Connection) -> Result<Vec<DayRecord>> {
        let mut stmt = conn.prepare(
            "SELECT date, water_count, goal, goal_met, points
             FROM day_records ORDER BY date",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DayRecord {
                date: row.get::<_, String>(0)?,
                water_count: row.get::<_, u32>(1)?,
                goal: row.get::<_, u32>(2)?,
                goal_met: row.get::<_, i32>(3)? != 0,
                points: row.get::<_, u32>(4)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Replace the stored window with `week` in a single transaction, so the
    /// table never holds days that have rolled out of the window.
    pub fn replace_week(conn: &mut Connection, week: &[DayRecord]) -> Result<()> {
        let tx = conn.transaction()?;
        Self::write_week(&tx, week)?;
        tx.commit()?;
        Ok(())
    }

    /// Caller owns the transaction.
    fn write_week(conn: &Connection, week: &[DayRecord]) -> Result<()> {
        conn.execute("DELETE FROM day_records", [])?;
        let mut stmt = conn.prepare(
            "INSERT INTO day_records (date, water_count, goal, goal_met, points)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let start = week.len().saturating_sub(WINDOW_DAYS);
        for day in &week[start..] {
            stmt.execute(params![
                day.date,
                day.water_count,
                day.goal,
                day.goal_met as i32,
                day.points
            ])
            .with_context(|| format!("Storing day {}", day.date))?;
        }
        Ok(())
    }
}

// ─── Saved state ─────────────────────────────────────────────────────────────

pub struct StateRepo;

impl StateRepo {
    /// `None` when nothing has been stored yet.
    pub fn load(conn: &Connection) -> Result<Option<SavedState>> {
        let week = DayRepo::get_week(conn)?;
        if week.is_empty() {
            return Ok(None);
        }
        Ok(Some(SavedState {
            week,
            total_points: MetaRepo::get_u32(conn, KEY_TOTAL_POINTS)?,
            streak: MetaRepo::get_u32(conn, KEY_STREAK)?,
        }))
    }

    /// The week and both totals are written together or not at all.
    pub fn save(conn: &mut Connection, state: &SavedState) -> Result<()> {
        let tx = conn.transaction()?;
        DayRepo::write_week(&tx, &state.week)?;
        MetaRepo::set(&tx, KEY_TOTAL_POINTS, &state.total_points.to_string())?;
        MetaRepo::set(&tx, KEY_STREAK, &state.streak.to_string())?;
        tx.commit().context("Committing saved state")?;
        Ok(())
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Missing or unparseable values read as 0.
    pub fn get_u32(conn: &Connection, key: &str) -> Result<u32> {
        Ok(Self::get(conn, key)?
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0))
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
