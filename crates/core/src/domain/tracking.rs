use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::db::{Database, HabitsDao, LogsDao};
use crate::error::{Error, Result};
use crate::models::{HabitLog, HabitWithLogs};
use crate::stats::log_window;

#[derive(Clone)]
pub struct TrackingService {
    habits: HabitsDao,
    logs: LogsDao,
}

impl TrackingService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            habits: HabitsDao::new(db.clone()),
            logs: LogsDao::new(db),
        }
    }

    /// Record a habit's completion flag for one calendar day. `None` means
    /// today. Writing the same (habit, date) again replaces the record.
    pub fn toggle_completion(
        &self,
        habit_id: &str,
        date: Option<NaiveDate>,
        completed: bool,
    ) -> Result<HabitLog> {
        if self.habits.get_habit(habit_id)?.is_none() {
            return Err(Error::NotFound(format!("habit {}", habit_id)));
        }

        let date = date.unwrap_or_else(|| Local::now().date_naive());
        self.logs.upsert_log(habit_id, date, completed)
    }

    /// All habits, each with a dense trailing window of `days` day entries
    pub fn habits_with_logs(&self, days: u32) -> Result<Vec<HabitWithLogs>> {
        let habits = self.habits.get_all_habits()?;
        let logs = self.logs.get_all_logs()?;
        let today = Local::now().date_naive();

        Ok(habits
            .into_iter()
            .map(|habit| {
                let days = log_window(&habit, &logs, days, today);
                HabitWithLogs { habit, days }
            })
            .collect())
    }

    /// All logs for one habit, newest first
    pub fn logs_for_habit(&self, habit_id: &str) -> Result<Vec<HabitLog>> {
        self.logs.get_logs_for_habit(habit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::domain::HabitsService;

    fn setup() -> (TrackingService, HabitsService) {
        let db = Arc::new(Database::in_memory().unwrap());
        db.with_connection(|conn| run_migrations(conn)).unwrap();

        (TrackingService::new(db.clone()), HabitsService::new(db))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_unknown_habit_is_not_found() {
        let (tracking, _) = setup();

        let err = tracking.toggle_completion("nope", None, true).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_toggle_twice_keeps_one_log() {
        let (tracking, habits) = setup();
        let habit = habits.create("Water", "", "", "", vec![]).unwrap();
        let day = date(2024, 3, 15);

        tracking.toggle_completion(&habit.id, Some(day), true).unwrap();
        let log = tracking.toggle_completion(&habit.id, Some(day), false).unwrap();

        assert!(!log.completed);
        assert_eq!(tracking.logs_for_habit(&habit.id).unwrap().len(), 1);
    }

    #[test]
    fn test_habits_with_logs_window_length() {
        let (tracking, habits) = setup();
        habits.create("Water", "", "", "", vec![]).unwrap();
        habits.create("Read", "", "", "", vec![]).unwrap();

        let with_logs = tracking.habits_with_logs(7).unwrap();
        assert_eq!(with_logs.len(), 2);
        for entry in with_logs {
            assert_eq!(entry.days.len(), 7);
        }
    }
}
