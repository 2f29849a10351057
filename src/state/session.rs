//! Work/rest session flow
//!
//! Owns the timer state, the rest configuration and the controller, and
//! applies the page transitions a user can trigger.

use std::sync::{Arc, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{AppPage, SharedTimerState, TimerState};
use crate::{
    error::SessionError,
    services::Notifier,
    timer::{ControllerStatus, RestConfig, TimerCallbacks, TimerController},
    utils::format_duration,
};

/// Timer activity delivered back to the session from the ticking task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Tick,
    HourReached(u64),
    RestCompleted,
}

/// Point-in-time view of the session for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub page: AppPage,
    pub controller: ControllerStatus,
    pub is_running: bool,
    pub is_paused: bool,
    pub elapsed_seconds: u64,
    pub rest_seconds: u64,
    pub current_work_hour: u64,
    pub last_hour_notified: u64,
    /// Clock for the current page, `HH:MM:SS`
    pub display: String,
}

impl TimerSnapshot {
    pub fn new(page: AppPage, controller: ControllerStatus, timer: &TimerState) -> Self {
        let display = match page {
            AppPage::Starting => format_duration(0),
            AppPage::Working => format_duration(timer.elapsed_seconds),
            AppPage::Resting => format_duration(timer.rest_seconds),
        };

        Self {
            page,
            controller,
            is_running: timer.is_running,
            is_paused: timer.is_paused,
            elapsed_seconds: timer.elapsed_seconds,
            rest_seconds: timer.rest_seconds,
            current_work_hour: timer.current_work_hour(),
            last_hour_notified: timer.last_hour_notified,
            display,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::new(AppPage::Starting, ControllerStatus::Idle, &TimerState::new())
    }
}

/// Hooks that forward timer activity into a session event channel
pub fn session_callbacks(events: mpsc::UnboundedSender<SessionEvent>) -> TimerCallbacks {
    let on_tick = events.clone();
    let on_hour = events.clone();
    let on_complete = events;

    TimerCallbacks::new()
        .with_on_tick(move || forward(&on_tick, SessionEvent::Tick))
        .with_on_hour(move |hours| forward(&on_hour, SessionEvent::HourReached(hours)))
        .with_on_complete(move || forward(&on_complete, SessionEvent::RestCompleted))
}

fn forward(events: &mpsc::UnboundedSender<SessionEvent>, event: SessionEvent) {
    if events.send(event).is_err() {
        debug!("Session event receiver gone, dropping {:?}", event);
    }
}

/// A single user's work/rest session
#[derive(Debug)]
pub struct Session {
    page: AppPage,
    timer_state: SharedTimerState,
    config: RestConfig,
    controller: TimerController,
}

impl Session {
    /// Create a session whose timer activity is reported on `events`
    pub fn new(
        config: RestConfig,
        notifier: Arc<dyn Notifier>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let timer_state = TimerState::shared();
        let controller = TimerController::new(
            Arc::clone(&timer_state),
            notifier,
            session_callbacks(events),
        );

        Self {
            page: AppPage::Starting,
            timer_state,
            config,
            controller,
        }
    }

    pub fn page(&self) -> AppPage {
        self.page
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn timer_state(&self) -> &SharedTimerState {
        &self.timer_state
    }

    pub fn controller(&self) -> &TimerController {
        &self.controller
    }

    /// Copy of the current timer state
    pub fn timer(&self) -> Result<TimerState, SessionError> {
        Ok(self.lock_timer()?.clone())
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, SessionError> {
        let status = self.controller.status();
        let timer = self.lock_timer()?;
        Ok(TimerSnapshot::new(self.page, status, &timer))
    }

    /// Return to the landing page
    pub fn show_starting(&mut self) {
        info!("Showing starting page");
        self.page = AppPage::Starting;
    }

    /// Enter a fresh work phase: stop ticking and zero the counters
    pub async fn show_working(&mut self) -> Result<(), SessionError> {
        self.controller.stop().await?;
        self.lock_timer()?.reset();
        self.page = AppPage::Working;
        info!("Showing working page");
        Ok(())
    }

    /// Start the work clock on the working page
    pub async fn start_work(&mut self) -> Result<(), SessionError> {
        const ACTION: &str = "start work";
        if self.page != AppPage::Working {
            return Err(SessionError::invalid(
                ACTION,
                format!("session is on the {} page", self.page),
            ));
        }
        if self.controller.is_active() {
            return Err(SessionError::invalid(ACTION, "timer is already running"));
        }

        self.controller.start_work_timer().await?;
        info!("Work timer started");
        Ok(())
    }

    /// Leave work for a rest period sized from the work done so far
    pub async fn go_resting(&mut self) -> Result<u64, SessionError> {
        if self.page != AppPage::Working {
            return Err(SessionError::invalid(
                "go resting",
                format!("session is on the {} page", self.page),
            ));
        }

        self.controller.stop().await?;
        let rest_seconds = {
            let mut timer = self.lock_timer()?;
            timer.rest_seconds = self.config.calculate_rest_duration(timer.elapsed_seconds);
            timer.halt();
            info!(
                "Worked {} seconds, earned {} seconds of rest",
                timer.elapsed_seconds, timer.rest_seconds
            );
            timer.rest_seconds
        };
        self.page = AppPage::Resting;
        Ok(rest_seconds)
    }

    /// Start the rest countdown on the resting page
    pub async fn start_rest(&mut self) -> Result<(), SessionError> {
        const ACTION: &str = "start rest";
        if self.page != AppPage::Resting {
            return Err(SessionError::invalid(
                ACTION,
                format!("session is on the {} page", self.page),
            ));
        }
        if self.controller.is_active() {
            return Err(SessionError::invalid(ACTION, "timer is already running"));
        }

        self.controller.start_rest_timer().await?;
        info!("Rest timer started");
        Ok(())
    }

    /// Pause or resume the running timer, returning the new paused flag
    pub fn toggle_pause(&mut self) -> Result<bool, SessionError> {
        if !self.controller.is_active() {
            return Err(SessionError::invalid("toggle pause", "no timer is running"));
        }

        let mut timer = self.lock_timer()?;
        if !timer.is_running {
            return Err(SessionError::invalid("toggle pause", "no timer is running"));
        }
        let paused = timer.toggle_pause();
        info!("Timer {}", if paused { "paused" } else { "resumed" });
        Ok(paused)
    }

    /// Stop everything and go back to the landing page
    pub async fn stop_and_reset(&mut self) -> Result<(), SessionError> {
        self.controller.stop().await?;
        self.lock_timer()?.reset();
        self.show_starting();
        Ok(())
    }

    /// Abandon the rest period and begin a new work phase
    pub async fn skip_resting(&mut self) -> Result<(), SessionError> {
        if self.page != AppPage::Resting {
            return Err(SessionError::invalid(
                "skip resting",
                format!("session is on the {} page", self.page),
            ));
        }

        self.controller.stop().await?;
        self.lock_timer()?.reset();
        self.show_working().await
    }

    /// React to activity reported by the ticking task
    pub async fn handle_event(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::Tick => Ok(()),
            SessionEvent::HourReached(hours) => {
                info!("Session reached {} hour(s) of work", hours);
                Ok(())
            }
            SessionEvent::RestCompleted => {
                if self.page != AppPage::Resting {
                    debug!("Ignoring rest completion on the {} page", self.page);
                    Ok(())
                } else if !self.controller.rest_finished() {
                    debug!(
                        "Ignoring stale rest completion, controller is {:?}",
                        self.controller.status()
                    );
                    Ok(())
                } else {
                    info!("Rest complete, starting a new work phase");
                    self.show_working().await
                }
            }
        }
    }

    /// Stop the ticking task before the process exits
    pub async fn shutdown(&mut self) -> Result<(), SessionError> {
        info!("Shutting down session timer");
        self.controller.stop().await?;
        Ok(())
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, SessionError> {
        self.timer_state
            .lock()
            .map_err(|e| SessionError::StateLock(e.to_string()))
    }
}
