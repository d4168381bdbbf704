use chrono::{Duration, NaiveDate};

use crate::models::HabitLog;

/// Current consecutive-day streak of completed logs for one habit,
/// counted backward from `today`.
///
/// Today being unlogged does not break a streak that ended yesterday,
/// but it does not count toward it either. Any gap stops counting at
/// the gap; there is no partial credit.
pub fn current_streak(habit_id: &str, logs: &[HabitLog], today: NaiveDate) -> u32 {
    // Dates after today can never count and must not steal the anchor
    // from a live streak.
    let mut dates: Vec<NaiveDate> = logs
        .iter()
        .filter(|log| log.habit_id == habit_id && log.completed && log.date <= today)
        .map(|log| log.date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let Some(&latest) = dates.first() else {
        return 0;
    };

    // Anchor the walk at today when today is completed, otherwise at
    // yesterday; the first date that misses the cursor ends the streak.
    let mut expected = if latest == today {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    for date in dates {
        if date == expected {
            streak += 1;
            expected -= Duration::days(1);
        } else {
            break;
        }
    }

    streak
}
