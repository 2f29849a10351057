//! TaskPomodoro - a headless Pomodoro work/rest timer
//!
//! This library provides the timer engine (state, proportional rest
//! calculation, one-second ticking controller), desktop notification
//! dispatch and a small HTTP control API for driving a work/rest session.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::SessionError;
pub use state::{AppState, Session, TimerState};
pub use timer::{calculate_rest_duration, RestConfig, TimerController};
pub use utils::{format_duration, shutdown_signal};
