use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::HabitLog;
use crate::utils::time::window_start;

/// Completion rate for one habit over a trailing window of `window_days`
/// calendar days ending at `today` inclusive, as a percentage in [0, 100].
///
/// A window with no eligible days (`window_days <= 0`) yields 0 rather
/// than an error.
pub fn completion_rate(
    habit_id: &str,
    logs: &[HabitLog],
    window_days: i32,
    today: NaiveDate,
) -> f64 {
    if window_days <= 0 {
        return 0.0;
    }

    let start = window_start(today, window_days as u32);

    // Count eligible days and distinct completed days arithmetically so
    // an oversized window stays cheap and total.
    let total = (today - start).num_days() + 1;
    let completed_dates: HashSet<NaiveDate> = logs
        .iter()
        .filter(|log| {
            log.habit_id == habit_id && log.completed && log.date >= start && log.date <= today
        })
        .map(|log| log.date)
        .collect();

    completed_dates.len() as f64 / total as f64 * 100.0
}
