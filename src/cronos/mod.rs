pub mod describe;
pub mod humanize;
pub mod stats;
pub mod types;
pub mod views;

pub use describe::{describe, describe_schedule, next_run, next_runs, validate_cron};
pub use humanize::humanize;
pub use types::*;
