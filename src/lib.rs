// Module declarations
pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod cronos;
pub mod error;
pub mod i18n;
pub mod poller;
pub mod utils;
pub mod watchdog;

pub use error::{AppError, ErrorCode};
