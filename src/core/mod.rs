pub mod error;
pub mod money;

pub use error::{AppError, Result};
pub use money::{format_count, format_percent, Money};
