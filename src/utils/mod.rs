//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod formatting;
pub mod signals;

// Re-export main functions
pub use formatting::{format_duration, format_hours_text, format_uptime};
pub use signals::shutdown_signal;
