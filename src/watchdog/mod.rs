pub mod health;
pub mod types;

pub use health::{build_view, classify, classify_opt, classify_with_threshold};
pub use types::*;
