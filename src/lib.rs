//! Merchant Report Service Library
//!
//! Computes per-merchant payment metrics, draws them as chart images and
//! serves the combined PDF report over HTTP.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use core::{AppError, Result};
pub use modules::health;
pub use modules::reports;
