pub mod habit;
pub mod log;
pub mod statistics;
pub mod tag;

pub use habit::Habit;
pub use log::HabitLog;
pub use statistics::{DayBucket, DayStatus, HabitDayStatus, HabitWithLogs, StatsData};
pub use tag::{TAG_CATALOG, Tag};
