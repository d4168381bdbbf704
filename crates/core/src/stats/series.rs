use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::models::{DayBucket, DayStatus, Habit, HabitDayStatus, HabitLog};
use crate::utils::time::{days_of_week, window_start};

/// Day-bucketed completion series for the week containing `reference_date`.
///
/// Always exactly 7 buckets, Sunday through Saturday in chronological
/// order, regardless of habit and log counts. Completed logs are indexed
/// by (habit, date) once per call.
pub fn weekly_series(
    habits: &[Habit],
    logs: &[HabitLog],
    reference_date: NaiveDate,
) -> Vec<DayBucket> {
    let completed: HashSet<(&str, NaiveDate)> = logs
        .iter()
        .filter(|log| log.completed)
        .map(|log| (log.habit_id.as_str(), log.date))
        .collect();

    days_of_week(reference_date)
        .into_iter()
        .map(|day| {
            let habit_statuses: Vec<HabitDayStatus> = habits
                .iter()
                .map(|habit| HabitDayStatus {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    completed: completed.contains(&(habit.id.as_str(), day)),
                })
                .collect();

            let completed_count = habit_statuses.iter().filter(|s| s.completed).count() as u32;

            DayBucket {
                date: day,
                label: day.format("%a").to_string(),
                completed_count,
                habits: habit_statuses,
            }
        })
        .collect()
}

/// Dense trailing window of `days` calendar days ending at `today` for one
/// habit: one entry per day, completed false where no completed log exists.
pub fn log_window(habit: &Habit, logs: &[HabitLog], days: u32, today: NaiveDate) -> Vec<DayStatus> {
    if days == 0 {
        return Vec::new();
    }

    let completed: HashSet<NaiveDate> = logs
        .iter()
        .filter(|log| log.habit_id == habit.id && log.completed)
        .map(|log| log.date)
        .collect();

    let start = window_start(today, days);
    (0..days as i64)
        .map(|i| {
            let date = start + Duration::days(i);
            DayStatus {
                date,
                completed: completed.contains(&date),
            }
        })
        .collect()
}
