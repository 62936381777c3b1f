pub mod format;
pub mod timestamp;
