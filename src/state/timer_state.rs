//! Timer state structure and management

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Timer state shared between the ticking task and its owning session
pub type SharedTimerState = Arc<Mutex<TimerState>>;

const SECONDS_PER_HOUR: u64 = 3600;

/// Run/pause flags plus the work and rest counters of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Timer is actively ticking
    pub is_running: bool,
    /// Ticking suspended without resetting the session
    pub is_paused: bool,
    /// Cumulative work time, counting up
    pub elapsed_seconds: u64,
    /// Remaining rest time, counting down
    pub rest_seconds: u64,
    /// Highest whole-hour boundary already notified
    pub last_hour_notified: u64,
}

impl TimerState {
    /// Create a fresh, idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh state for sharing with a ticking task
    pub fn shared() -> SharedTimerState {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Return every field to zero/false
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mark the timer running and unpaused. Counters are left alone.
    pub fn start(&mut self) {
        self.is_running = true;
        self.is_paused = false;
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.is_paused = false;
    }

    /// Flip the pause flag and return the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    /// Force the timer inactive without touching the counters
    pub fn halt(&mut self) {
        self.is_running = false;
        self.is_paused = false;
    }

    /// Whether a tick should advance the counters right now
    pub fn is_ticking(&self) -> bool {
        self.is_running && !self.is_paused
    }

    /// Add one second of work
    pub fn increment_work(&mut self) {
        self.elapsed_seconds += 1;
    }

    /// Remove one second of rest, clamped at zero.
    ///
    /// Returns `true` once the rest period is used up.
    pub fn decrement_rest(&mut self) -> bool {
        self.rest_seconds = self.rest_seconds.saturating_sub(1);
        self.rest_seconds == 0
    }

    /// Whole hours worked so far
    pub fn current_work_hour(&self) -> u64 {
        self.elapsed_seconds / SECONDS_PER_HOUR
    }

    /// Hourly milestone edge detector.
    ///
    /// Fires once when the worked hour count moves past the last notified
    /// hour, recording the new hour so repeated calls stay quiet.
    pub fn should_notify_hour(&mut self) -> bool {
        let current_hour = self.current_work_hour();
        if current_hour > self.last_hour_notified {
            self.last_hour_notified = current_hour;
            true
        } else {
            false
        }
    }

    /// Forget previously notified hours, used when a work phase begins
    pub fn clear_hour_milestone(&mut self) {
        self.last_hour_notified = 0;
    }
}
