use chrono::NaiveDate;

use crate::models::Habit;

/// Dashboard-wide aggregate statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsData {
    pub total_habits: u32,
    pub completed_today: u32,
    pub total_completed_this_week: u32,
    pub longest_streak: u32,
    /// Aggregate 7-day completion rate across all habits combined,
    /// denominator `total_habits * 7`. Percentage in [0, 100].
    pub completion_rate: f64,
}

impl StatsData {
    pub fn empty() -> Self {
        Self {
            total_habits: 0,
            completed_today: 0,
            total_completed_this_week: 0,
            longest_streak: 0,
            completion_rate: 0.0,
        }
    }
}

/// One day of the weekly chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Short weekday label ("Sun", "Mon", ...).
    pub label: String,
    /// Number of habits with a completed log on this day.
    pub completed_count: u32,
    pub habits: Vec<HabitDayStatus>,
}

/// Per-habit completion flag inside a [`DayBucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDayStatus {
    pub habit_id: String,
    pub name: String,
    pub completed: bool,
}

/// One day of a habit's dense trailing log window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub completed: bool,
}

/// A habit together with its dense log window for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitWithLogs {
    pub habit: Habit,
    pub days: Vec<DayStatus>,
}
