pub mod demo;
pub mod habits;
pub mod statistics;
pub mod tracking;

pub use habits::HabitsService;
pub use statistics::StatsService;
pub use tracking::TrackingService;
