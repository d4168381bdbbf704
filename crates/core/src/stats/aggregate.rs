use chrono::NaiveDate;

use crate::models::{Habit, HabitLog, StatsData};
use crate::stats::current_streak;
use crate::utils::time::{end_of_week, start_of_week};

/// Dashboard aggregate statistics over all habits and logs.
///
/// The aggregate completion rate is a coarser metric than the per-habit
/// rate: the denominator is `total_habits * 7` and the numerator counts
/// completed logs at most 7 days old across all habits combined.
pub fn aggregate_stats(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> StatsData {
    let total_habits = habits.len() as u32;

    let completed_today = logs
        .iter()
        .filter(|log| log.completed && log.date == today)
        .count() as u32;

    let week_start = start_of_week(today);
    let week_end = end_of_week(today);
    let total_completed_this_week = logs
        .iter()
        .filter(|log| log.completed && log.date >= week_start && log.date <= week_end)
        .count() as u32;

    let longest_streak = habits
        .iter()
        .map(|habit| current_streak(&habit.id, logs, today))
        .max()
        .unwrap_or(0);

    let completion_rate = if total_habits == 0 {
        0.0
    } else {
        let recent_completions = logs
            .iter()
            .filter(|log| log.completed && (today - log.date).num_days() <= 7)
            .count();
        recent_completions as f64 / (total_habits as f64 * 7.0) * 100.0
    };

    StatsData {
        total_habits,
        completed_today,
        total_completed_this_week,
        longest_streak,
        completion_rate,
    }
}
