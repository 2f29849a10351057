//! External collaborator module
//!
//! This module contains the notification dispatcher and its backends, plus
//! host capability checks used at startup.

pub mod notifications;
pub mod system;

// Re-export main functions
pub use notifications::*;
pub use system::*;
