//! Application page structure

use std::fmt;

use serde::{Deserialize, Serialize};

/// The page the session is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPage {
    /// Landing page, no timer running
    #[default]
    Starting,
    /// Work timer page, counting up
    Working,
    /// Rest timer page, counting down
    Resting,
}

impl fmt::Display for AppPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppPage::Starting => write!(f, "starting"),
            AppPage::Working => write!(f, "working"),
            AppPage::Resting => write!(f, "resting"),
        }
    }
}
