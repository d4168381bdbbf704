use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A record of whether a habit was completed on one specific calendar day.
///
/// Logically keyed by (habit_id, date); the store enforces at most one
/// log per habit per calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl HabitLog {
    pub fn new(habit_id: impl Into<String>, date: NaiveDate, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date,
            completed,
            created_at: Utc::now(),
        }
    }

    /// The storage representation of the log date, ISO `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
