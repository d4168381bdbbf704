use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::Habit;

#[derive(Clone)]
pub struct HabitsDao {
    db: Arc<Database>,
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
        tags: Vec::new(),
        created_at,
    })
}

impl HabitsDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn get_habit(&self, habit_id: &str) -> Result<Option<Habit>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT habit_id, name, description, icon, color, created_at
                 FROM habit WHERE habit_id = ?1",
            )?;

            let habit = stmt
                .query_row(params![habit_id], habit_from_row)
                .optional()?;

            let Some(mut habit) = habit else {
                return Ok(None);
            };

            let mut tag_stmt =
                conn.prepare("SELECT tag_id FROM habit_tag WHERE habit_id = ?1 ORDER BY tag_id")?;
            habit.tags = tag_stmt
                .query_map(params![habit_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(Some(habit))
        })
    }

    pub fn get_all_habits(&self) -> Result<Vec<Habit>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT habit_id, name, description, icon, color, created_at
                 FROM habit ORDER BY name",
            )?;

            let mut habits = stmt
                .query_map([], habit_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut tag_stmt = conn
                .prepare("SELECT habit_id, tag_id FROM habit_tag ORDER BY habit_id, tag_id")?;
            let mut tags_by_habit: HashMap<String, Vec<String>> = HashMap::new();
            for row in tag_stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })? {
                let (habit_id, tag_id) = row?;
                tags_by_habit.entry(habit_id).or_default().push(tag_id);
            }

            for habit in &mut habits {
                if let Some(tags) = tags_by_habit.remove(&habit.id) {
                    habit.tags = tags;
                }
            }

            Ok(habits)
        })
    }

    /// Insert or replace the whole habit record, id preserved. The tag set
    /// is replaced along with the row.
    pub fn save_habit(&self, habit: &Habit) -> Result<()> {
        debug!(habit_id = %habit.id, name = %habit.name, "saving habit");

        self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO habit (habit_id, name, description, icon, color, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(habit_id) DO UPDATE SET
                     name = ?2, description = ?3, icon = ?4, color = ?5",
                params![
                    &habit.id,
                    &habit.name,
                    &habit.description,
                    &habit.icon,
                    &habit.color,
                    habit.created_at.to_rfc3339(),
                ],
            )?;

            tx.execute("DELETE FROM habit_tag WHERE habit_id = ?1", params![&habit.id])?;
            for tag_id in &habit.tags {
                tx.execute(
                    "INSERT INTO habit_tag (habit_id, tag_id) VALUES (?1, ?2)
                     ON CONFLICT(habit_id, tag_id) DO NOTHING",
                    params![&habit.id, tag_id],
                )?;
            }

            Ok(())
        })
    }

    /// Delete a habit and, in the same transaction, all of its logs and
    /// tag rows.
    pub fn delete_habit(&self, habit_id: &str) -> Result<()> {
        debug!(habit_id, "deleting habit");

        self.db.transaction(|tx| {
            tx.execute("DELETE FROM habit_log WHERE habit_id = ?1", params![habit_id])?;
            tx.execute("DELETE FROM habit_tag WHERE habit_id = ?1", params![habit_id])?;
            let deleted = tx.execute("DELETE FROM habit WHERE habit_id = ?1", params![habit_id])?;

            if deleted == 0 {
                return Err(Error::NotFound(format!("habit {}", habit_id)));
            }

            Ok(())
        })
    }
}
