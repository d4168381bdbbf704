//! Pure statistics engine over habit and log collections.
//!
//! Every function here is a pure computation of its inputs and a pinned
//! `today` value: no clock reads, no storage access, no internal state.
//! Callers pin `today` once per invocation so results stay stable across
//! a midnight boundary.

pub mod aggregate;
pub mod rate;
pub mod series;
pub mod streak;

pub use aggregate::aggregate_stats;
pub use rate::completion_rate;
pub use series::{log_window, weekly_series};
pub use streak::current_streak;
