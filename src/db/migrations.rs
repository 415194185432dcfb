use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS activity_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            module      TEXT NOT NULL CHECK(module IN
                        ('login','food','exercise','medication','water','weight')),
            date        TEXT NOT NULL,
            count       INTEGER NOT NULL DEFAULT 0,
            updated_at  TEXT DEFAULT (datetime('now')),
            UNIQUE(module, date)
        );

        CREATE INDEX IF NOT EXISTS idx_activity_module_date
            ON activity_log(module, date);

        CREATE TABLE IF NOT EXISTS streak_best (
            module         TEXT PRIMARY KEY,
            best_days      INTEGER NOT NULL DEFAULT 0,
            baseline_days  INTEGER NOT NULL DEFAULT 0,
            baseline_date  TEXT NOT NULL
        );
    ")?;
    Ok(())
}
