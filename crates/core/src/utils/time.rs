use chrono::{Datelike, Days, Duration, NaiveDate};

/// Get the start of the week (Sunday) containing the given date
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Get the end of the week (Saturday) containing the given date
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

/// The seven days of the week containing `date`, Sunday first
pub fn days_of_week(date: NaiveDate) -> Vec<NaiveDate> {
    let start = start_of_week(date);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// The first day of a trailing window of `days` calendar days ending at
/// `today` inclusive. Windows reaching past chrono's representable range
/// are clamped rather than overflowing.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(days.saturating_sub(1) as u64))
        .unwrap_or(NaiveDate::MIN)
}
