//! One-second ticking background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    services::{dispatch_in_background, NotificationMessage, Notifier},
    state::SharedTimerState,
    timer::{TimerCallbacks, TimerMode},
};

/// Cadence of the ticking loop
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or not running, nothing changed
    Idle,
    /// Counters advanced, keep ticking
    Advanced,
    /// Rest countdown reached zero, the loop must end
    Completed,
}

/// Background task advancing the shared timer state once per second.
///
/// Runs until `cancel` fires or, in rest mode, until the countdown
/// completes. Paused ticks still wake up on schedule but change nothing.
pub async fn tick_loop_task(
    mode: TimerMode,
    state: SharedTimerState,
    notifier: Arc<dyn Notifier>,
    callbacks: TimerCallbacks,
    cancel: CancellationToken,
) {
    info!("Starting {} tick loop", mode);

    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("{} tick loop cancelled", mode);
                break;
            }

            _ = interval.tick() => {
                match advance(mode, &state, &notifier, &callbacks) {
                    Ok(TickOutcome::Completed) => {
                        info!("Rest countdown complete, ending tick loop");
                        break;
                    }
                    Ok(TickOutcome::Advanced) | Ok(TickOutcome::Idle) => {}
                    Err(e) => {
                        error!("Stopping {} tick loop: {}", mode, e);
                        break;
                    }
                }
            }
        }
    }

    debug!("{} tick loop exited", mode);
}

/// Apply one tick in the given mode.
///
/// The state lock is released before notifications and callbacks run so
/// observers may read the state from inside a callback. Notifications are
/// handed to the blocking pool; the tick never waits for delivery.
pub fn advance(
    mode: TimerMode,
    state: &SharedTimerState,
    notifier: &Arc<dyn Notifier>,
    callbacks: &TimerCallbacks,
) -> Result<TickOutcome, String> {
    match mode {
        TimerMode::Work => {
            let milestone = {
                let mut timer = state
                    .lock()
                    .map_err(|e| format!("Failed to lock timer state: {}", e))?;
                if !timer.is_ticking() {
                    return Ok(TickOutcome::Idle);
                }
                timer.increment_work();
                timer.should_notify_hour().then(|| timer.current_work_hour())
            };

            if let Some(hours) = milestone {
                info!("Work milestone reached: {} hour(s)", hours);
                dispatch_in_background(notifier, NotificationMessage::hourly_update(hours));
                callbacks.hour(hours);
            }
            callbacks.tick();
            Ok(TickOutcome::Advanced)
        }
        TimerMode::Rest => {
            let complete = {
                let mut timer = state
                    .lock()
                    .map_err(|e| format!("Failed to lock timer state: {}", e))?;
                if !timer.is_ticking() {
                    return Ok(TickOutcome::Idle);
                }
                timer.decrement_rest()
            };

            callbacks.tick();
            if complete {
                dispatch_in_background(notifier, NotificationMessage::rest_complete());
                callbacks.complete();
                Ok(TickOutcome::Completed)
            } else {
                Ok(TickOutcome::Advanced)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LogNotifier;
    use crate::state::TimerState;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn running_state(elapsed: u64, rest: u64) -> SharedTimerState {
        let state = TimerState::shared();
        {
            let mut timer = state.lock().unwrap();
            timer.start();
            timer.elapsed_seconds = elapsed;
            timer.rest_seconds = rest;
        }
        state
    }

    fn log_notifier() -> Arc<dyn Notifier> {
        Arc::new(LogNotifier)
    }

    #[tokio::test]
    async fn paused_tick_is_a_no_op() {
        let state = running_state(5, 5);
        let notifier = log_notifier();
        state.lock().unwrap().pause();
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ticks);
        let callbacks = TimerCallbacks::new().with_on_tick(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for mode in [TimerMode::Work, TimerMode::Rest] {
            let outcome = advance(mode, &state, &notifier, &callbacks).unwrap();
            assert_eq!(outcome, TickOutcome::Idle);
        }

        let timer = state.lock().unwrap();
        assert_eq!(timer.elapsed_seconds, 5);
        assert_eq!(timer.rest_seconds, 5);
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn work_tick_reports_hour_before_tick() {
        let state = running_state(3599, 0);
        let notifier = log_notifier();
        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let on_hour = Arc::clone(&events);
        let on_tick = Arc::clone(&events);
        let callbacks = TimerCallbacks::new()
            .with_on_hour(move |hours| on_hour.lock().unwrap().push(format!("hour:{hours}")))
            .with_on_tick(move || on_tick.lock().unwrap().push("tick".to_string()));

        let outcome = advance(TimerMode::Work, &state, &notifier, &callbacks).unwrap();

        assert_eq!(outcome, TickOutcome::Advanced);
        assert_eq!(*events.lock().unwrap(), vec!["hour:1", "tick"]);
        assert_eq!(state.lock().unwrap().last_hour_notified, 1);
    }

    #[tokio::test]
    async fn final_rest_tick_completes_after_tick_callback() {
        let state = running_state(0, 1);
        let notifier = log_notifier();
        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let on_tick = Arc::clone(&events);
        let on_complete = Arc::clone(&events);
        let callbacks = TimerCallbacks::new()
            .with_on_tick(move || on_tick.lock().unwrap().push("tick"))
            .with_on_complete(move || on_complete.lock().unwrap().push("complete"));

        let outcome = advance(TimerMode::Rest, &state, &notifier, &callbacks).unwrap();

        assert_eq!(outcome, TickOutcome::Completed);
        assert_eq!(*events.lock().unwrap(), vec!["tick", "complete"]);
        assert_eq!(state.lock().unwrap().rest_seconds, 0);
    }

    #[tokio::test]
    async fn missing_callbacks_are_skipped() {
        let state = running_state(0, 3);
        let notifier = log_notifier();
        let callbacks = TimerCallbacks::new();
        assert_eq!(
            advance(TimerMode::Rest, &state, &notifier, &callbacks).unwrap(),
            TickOutcome::Advanced
        );
        assert_eq!(
            advance(TimerMode::Work, &state, &notifier, &callbacks).unwrap(),
            TickOutcome::Advanced
        );
    }
}
