use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use streakwise::models::{DailyActivitySignal, DayKey, TrackedModule};

// ─── Activity log ────────────────────────────────────────────────────────────

pub struct ActivityRepo;

impl ActivityRepo {
    /// Add `count` entries to a day, creating the row if needed. Returns the new total.
    pub fn add(conn: &Connection, module: TrackedModule, date: DayKey, count: u32) -> Result<i64> {
        conn.execute(
            "INSERT INTO activity_log (module, date, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(module, date) DO UPDATE
             SET count = count + ?3, updated_at = datetime('now')",
            params![module.as_str(), date.to_string(), count],
        )?;
        Self::get_count(conn, module, date)
    }

    /// Overwrite a day's count.
    pub fn set(conn: &Connection, module: TrackedModule, date: DayKey, count: u32) -> Result<()> {
        conn.execute(
            "INSERT INTO activity_log (module, date, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(module, date) DO UPDATE
             SET count = ?3, updated_at = datetime('now')",
            params![module.as_str(), date.to_string(), count],
        )?;
        Ok(())
    }

    pub fn get_count(conn: &Connection, module: TrackedModule, date: DayKey) -> Result<i64> {
        conn.query_row(
            "SELECT count FROM activity_log WHERE module = ?1 AND date = ?2",
            params![module.as_str(), date.to_string()],
            |row| row.get(0),
        )
        .optional()
        .map(|v| v.unwrap_or(0))
        .map_err(anyhow::Error::from)
    }

    /// Ascending per-day signals up to and including `through`.
    ///
    /// A day qualifies when its count reaches `daily_minimum`. Rows that do not
    /// parse are an error, never skipped.
    pub fn history(
        conn: &Connection,
        module: TrackedModule,
        daily_minimum: u32,
        through: DayKey,
    ) -> Result<Vec<DailyActivitySignal>> {
        let mut stmt = conn.prepare(
            "SELECT date, count FROM activity_log
             WHERE module = ?1 AND date <= ?2
             ORDER BY date",
        )?;

        let rows = stmt.query_map(params![module.as_str(), through.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut result = Vec::new();
        for (i, r) in rows.enumerate() {
            let (date, count) = r?;
            let qualifies = module.qualifies(count, daily_minimum);
            result.push(DailyActivitySignal::from_raw(i, &date, qualifies, count)?);
        }
        Ok(result)
    }

    pub fn delete_day(conn: &Connection, module: TrackedModule, date: DayKey) -> Result<bool> {
        let n = conn.execute(
            "DELETE FROM activity_log WHERE module = ?1 AND date = ?2",
            params![module.as_str(), date.to_string()],
        )?;
        Ok(n > 0)
    }
}

// ─── Persisted best ──────────────────────────────────────────────────────────

/// Stored personal best for one module.
///
/// `baseline_days` is the best as it stood when `baseline_date` began; it is
/// what a running streak has to beat for the rest of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestRecord {
    pub best_days: u32,
    pub baseline_days: u32,
    pub baseline_date: DayKey,
}

pub struct BestRepo;

impl BestRepo {
    pub fn get(conn: &Connection, module: TrackedModule) -> Result<Option<BestRecord>> {
        let row = conn
            .query_row(
                "SELECT best_days, baseline_days, baseline_date FROM streak_best WHERE module = ?1",
                params![module.as_str()],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((best_days, baseline_days, baseline_date)) => Ok(Some(BestRecord {
                best_days,
                baseline_days,
                baseline_date: baseline_date.parse()?,
            })),
        }
    }

    pub fn save(conn: &Connection, module: TrackedModule, record: &BestRecord) -> Result<()> {
        conn.execute(
            "INSERT INTO streak_best (module, best_days, baseline_days, baseline_date)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(module) DO UPDATE
             SET best_days = ?2, baseline_days = ?3, baseline_date = ?4",
            params![
                module.as_str(),
                record.best_days,
                record.baseline_days,
                record.baseline_date.to_string()
            ],
        )?;
        Ok(())
    }
}
