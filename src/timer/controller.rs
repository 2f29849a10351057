//! Timer controller driving the work and rest phases

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{TimerCallbacks, TimerMode};
use crate::{
    services::Notifier,
    state::SharedTimerState,
    tasks::tick_loop_task,
};

/// Upper bound on how long `stop` waits for a ticking task to exit
pub const STOP_JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Observable lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "mode", rename_all = "snake_case")]
pub enum ControllerStatus {
    /// Nothing has been started yet
    Idle,
    /// A tick loop is alive and advancing the timer
    Running(TimerMode),
    /// A tick loop is alive but the timer is paused
    Paused(TimerMode),
    /// The rest countdown ran out and its loop ended on its own
    Completed,
    /// The last loop was stopped explicitly
    Stopped,
}

/// The live ticking task and the means to cancel it
#[derive(Debug)]
struct TickRun {
    mode: TimerMode,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives a shared [`crate::state::TimerState`] forward once per second.
///
/// At most one ticking task is alive per controller. Starting either phase
/// first stops and joins the previous task so an old loop can never touch
/// state prepared for the next phase.
#[derive(Debug)]
pub struct TimerController {
    state: SharedTimerState,
    notifier: Arc<dyn Notifier>,
    callbacks: TimerCallbacks,
    run: Option<TickRun>,
    stopped: bool,
}

impl TimerController {
    /// Create an idle controller for `state`
    pub fn new(
        state: SharedTimerState,
        notifier: Arc<dyn Notifier>,
        callbacks: TimerCallbacks,
    ) -> Self {
        Self {
            state,
            notifier,
            callbacks,
            run: None,
            stopped: false,
        }
    }

    /// The timer state this controller drives
    pub fn state(&self) -> &SharedTimerState {
        &self.state
    }

    /// Start counting work time upward.
    ///
    /// Stops any previous loop, marks the timer running, clears the hourly
    /// milestone and launches a work loop. Elapsed time is not reset here.
    pub async fn start_work_timer(&mut self) -> Result<(), String> {
        self.halt_loop().await;
        {
            let mut timer = self
                .state
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            timer.start();
            timer.clear_hour_milestone();
        }
        self.launch(TimerMode::Work);
        Ok(())
    }

    /// Start counting the rest period down.
    ///
    /// `rest_seconds` must already hold the computed rest duration.
    pub async fn start_rest_timer(&mut self) -> Result<(), String> {
        self.halt_loop().await;
        self.state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?
            .start();
        self.launch(TimerMode::Rest);
        Ok(())
    }

    /// Stop ticking and mark the timer inactive.
    ///
    /// Waits at most [`STOP_JOIN_TIMEOUT`] for the loop to exit. The state
    /// is forced to not running and not paused either way. Calling it again
    /// is harmless.
    pub async fn stop(&mut self) -> Result<(), String> {
        if self.halt_loop().await {
            self.stopped = true;
        }
        self.state
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?
            .halt();
        Ok(())
    }

    /// Whether a ticking task is currently alive
    pub fn is_active(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Mode of the most recently launched loop, if any
    pub fn mode(&self) -> Option<TimerMode> {
        self.run.as_ref().map(|run| run.mode)
    }

    /// Whether the current run is a rest countdown that has reached zero.
    ///
    /// False once the run is stopped or replaced, so a completion reported
    /// by an earlier rest loop can be told apart from the live one.
    pub fn rest_finished(&self) -> bool {
        self.mode() == Some(TimerMode::Rest)
            && self
                .state
                .lock()
                .map(|t| t.rest_seconds == 0)
                .unwrap_or(false)
    }

    /// Current lifecycle status
    pub fn status(&self) -> ControllerStatus {
        match &self.run {
            Some(run) if !run.handle.is_finished() => {
                let paused = self.state.lock().map(|t| t.is_paused).unwrap_or(false);
                if paused {
                    ControllerStatus::Paused(run.mode)
                } else {
                    ControllerStatus::Running(run.mode)
                }
            }
            Some(_) => ControllerStatus::Completed,
            None if self.stopped => ControllerStatus::Stopped,
            None => ControllerStatus::Idle,
        }
    }

    fn launch(&mut self, mode: TimerMode) {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(tick_loop_task(
            mode,
            Arc::clone(&self.state),
            Arc::clone(&self.notifier),
            self.callbacks.clone(),
            cancel.clone(),
        ));

        info!("Launched {} timer", mode);
        self.stopped = false;
        self.run = Some(TickRun {
            mode,
            cancel,
            handle,
        });
    }

    /// Cancel and join the current loop. Returns whether one existed.
    async fn halt_loop(&mut self) -> bool {
        let Some(mut run) = self.run.take() else {
            return false;
        };

        run.cancel.cancel();
        match tokio::time::timeout(STOP_JOIN_TIMEOUT, &mut run.handle).await {
            Ok(Ok(())) => debug!("{} loop joined", run.mode),
            Ok(Err(e)) => warn!("{} loop ended abnormally: {}", run.mode, e),
            Err(_) => {
                warn!(
                    "{} loop did not exit within {:?}, aborting it",
                    run.mode, STOP_JOIN_TIMEOUT
                );
                run.handle.abort();
            }
        }
        true
    }
}
