//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! per-phase ticking loop and the session event consumer.

pub mod session_events;
pub mod tick_loop;

// Re-export main functions
pub use session_events::session_event_task;
pub use tick_loop::{tick_loop_task, TickOutcome, TICK_INTERVAL};
