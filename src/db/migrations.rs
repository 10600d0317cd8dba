use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS day_records (
            date         TEXT PRIMARY KEY,
            water_count  INTEGER NOT NULL DEFAULT 0 CHECK(water_count >= 0),
            goal         INTEGER NOT NULL,
            goal_met     INTEGER NOT NULL DEFAULT 0,
            points       INTEGER NOT NULL DEFAULT 0 CHECK(points BETWEEN 0 AND 100),
            updated_at   TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}
