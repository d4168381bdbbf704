//! Core library for HabitKit: habit records, daily completion logs, and
//! the statistics engine computed over them (streaks, completion rates,
//! weekly chart series).

pub mod db;
pub mod domain;
pub mod error;
pub mod models;
pub mod stats;
pub mod utils;

pub use error::{Error, Result};
