//! State management module
//!
//! This module contains the timer state, the session page flow and the
//! application state shared with the HTTP layer.

pub mod app_state;
pub mod page;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use page::AppPage;
pub use session::{Session, SessionEvent, TimerSnapshot};
pub use timer_state::{SharedTimerState, TimerState};
