pub mod habits;
pub mod logs;

pub use habits::HabitsDao;
pub use logs::LogsDao;
