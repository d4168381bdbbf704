use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Row, params};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::models::HabitLog;

#[derive(Clone)]
pub struct LogsDao {
    db: Arc<Database>,
}

fn log_from_row(row: &Row<'_>) -> rusqlite::Result<HabitLog> {
    let date: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(HabitLog {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date,
        completed: row.get(3)?,
        created_at,
    })
}

const LOG_COLUMNS: &str = "log_id, habit_id, date, completed, created_at";

impl LogsDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Write the completion flag for (habit, date). A second write for the
    /// same pair replaces the existing record; the original log id and
    /// creation timestamp survive the replace.
    pub fn upsert_log(&self, habit_id: &str, date: NaiveDate, completed: bool) -> Result<HabitLog> {
        let log = HabitLog::new(habit_id, date, completed);

        debug!(habit_id, date = %log.date_string(), completed, "writing habit log");

        self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO habit_log (log_id, habit_id, date, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(habit_id, date) DO UPDATE SET completed = ?4",
                params![
                    &log.id,
                    habit_id,
                    log.date_string(),
                    completed,
                    log.created_at.to_rfc3339(),
                ],
            )?;

            let stored = tx.query_row(
                &format!(
                    "SELECT {} FROM habit_log WHERE habit_id = ?1 AND date = ?2",
                    LOG_COLUMNS
                ),
                params![habit_id, log.date_string()],
                log_from_row,
            )?;

            Ok(stored)
        })
    }

    pub fn get_all_logs(&self) -> Result<Vec<HabitLog>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM habit_log ORDER BY date",
                LOG_COLUMNS
            ))?;

            let logs = stmt
                .query_map([], log_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(logs)
        })
    }

    pub fn get_logs_for_habit(&self, habit_id: &str) -> Result<Vec<HabitLog>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM habit_log WHERE habit_id = ?1 ORDER BY date DESC",
                LOG_COLUMNS
            ))?;

            let logs = stmt
                .query_map(params![habit_id], log_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(logs)
        })
    }
}
