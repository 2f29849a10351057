//! Error types shared by the session and the HTTP API

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested action does not apply to the current page or timer state
    #[error("cannot {action}: {reason}")]
    InvalidTransition {
        action: &'static str,
        reason: String,
    },

    /// The shared timer state mutex was poisoned
    #[error("timer state unavailable: {0}")]
    StateLock(String),
}

impl SessionError {
    pub fn invalid(action: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            action,
            reason: reason.into(),
        }
    }
}

impl From<String> for SessionError {
    fn from(message: String) -> Self {
        Self::StateLock(message)
    }
}
