use std::sync::Arc;

use chrono::Local;

use crate::db::{Database, HabitsDao, LogsDao};
use crate::error::Result;
use crate::models::{DayBucket, StatsData};
use crate::stats;

/// Read-only facade over the pure statistics engine.
///
/// Each method reads one snapshot of habits and logs and pins `today`
/// once before computing, so results are stable even across a midnight
/// boundary mid-call.
#[derive(Clone)]
pub struct StatsService {
    habits: HabitsDao,
    logs: LogsDao,
}

impl StatsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            habits: HabitsDao::new(db.clone()),
            logs: LogsDao::new(db),
        }
    }

    /// Current consecutive-day streak for one habit
    pub fn streak(&self, habit_id: &str) -> Result<u32> {
        let logs = self.logs.get_logs_for_habit(habit_id)?;
        let today = Local::now().date_naive();

        Ok(stats::current_streak(habit_id, &logs, today))
    }

    /// Completion rate for one habit over a trailing window of days
    pub fn completion_rate(&self, habit_id: &str, window_days: i32) -> Result<f64> {
        let logs = self.logs.get_logs_for_habit(habit_id)?;
        let today = Local::now().date_naive();

        Ok(stats::completion_rate(habit_id, &logs, window_days, today))
    }

    /// Dashboard aggregate statistics over all habits
    pub fn dashboard(&self) -> Result<StatsData> {
        let habits = self.habits.get_all_habits()?;
        let logs = self.logs.get_all_logs()?;
        let today = Local::now().date_naive();

        Ok(stats::aggregate_stats(&habits, &logs, today))
    }

    /// Day-bucketed series for the current week, for chart rendering
    pub fn weekly_series(&self) -> Result<Vec<DayBucket>> {
        let habits = self.habits.get_all_habits()?;
        let logs = self.logs.get_all_logs()?;
        let today = Local::now().date_naive();

        Ok(stats::weekly_series(&habits, &logs, today))
    }
}
