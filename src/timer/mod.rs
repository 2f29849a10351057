//! Timer engine module
//!
//! Rest duration arithmetic and the controller that drives the shared
//! timer state once per second.

pub mod controller;
pub mod rest;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

pub use controller::{ControllerStatus, TimerController, STOP_JOIN_TIMEOUT};
pub use rest::{calculate_rest_duration, RestConfig};

/// Which way the clock is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Count elapsed work seconds upward, without bound
    Work,
    /// Count the precomputed rest duration down to zero
    Rest,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Work => write!(f, "work"),
            TimerMode::Rest => write!(f, "rest"),
        }
    }
}

type Hook = Arc<dyn Fn() + Send + Sync>;
type HourHook = Arc<dyn Fn(u64) + Send + Sync>;

/// Optional observer hooks invoked from the ticking task
#[derive(Clone, Default)]
pub struct TimerCallbacks {
    on_tick: Option<Hook>,
    on_complete: Option<Hook>,
    on_hour: Option<HourHook>,
}

impl TimerCallbacks {
    /// No hooks installed; every event is silently skipped
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every advancing tick
    pub fn with_on_tick(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tick = Some(Arc::new(hook));
        self
    }

    /// Called once when a rest countdown reaches zero
    pub fn with_on_complete(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(hook));
        self
    }

    /// Called with the new hour count at each hourly work milestone
    pub fn with_on_hour(mut self, hook: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_hour = Some(Arc::new(hook));
        self
    }

    pub(crate) fn tick(&self) {
        if let Some(hook) = &self.on_tick {
            hook();
        }
    }

    pub(crate) fn complete(&self) {
        if let Some(hook) = &self.on_complete {
            hook();
        }
    }

    pub(crate) fn hour(&self, hours: u64) {
        if let Some(hook) = &self.on_hour {
            hook(hours);
        }
    }
}

impl fmt::Debug for TimerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerCallbacks")
            .field("on_tick", &self.on_tick.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_hour", &self.on_hour.is_some())
            .finish()
    }
}
