//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use super::{Session, SessionEvent, TimerSnapshot};
use crate::{services::Notifier, timer::RestConfig, utils::format_uptime};

/// Main application state shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// The single work/rest session driven by this process
    pub session: tokio::sync::Mutex<Session>,
    /// Rest ratio configuration fixed at startup
    pub rest_config: RestConfig,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel carrying the latest timer snapshot
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create the application state and the receiver for session events.
    ///
    /// The receiver must be handed to
    /// [`crate::tasks::session_event_task`] so timer activity reaches the
    /// session.
    pub fn new(
        port: u16,
        host: String,
        rest_config: RestConfig,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::default());

        let state = Self {
            session: tokio::sync::Mutex::new(Session::new(rest_config, notifier, events_tx)),
            rest_config,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };

        (state, events_rx)
    }

    /// Subscribe to timer snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Publish the session's current snapshot to watchers
    pub fn publish(&self, session: &Session) -> Option<TimerSnapshot> {
        match session.snapshot() {
            Ok(snapshot) => {
                self.snapshot_tx.send_replace(snapshot.clone());
                Some(snapshot)
            }
            Err(e) => {
                warn!("Failed to take timer snapshot: {}", e);
                None
            }
        }
    }

    /// Remember a user action and publish the resulting snapshot
    pub fn record_action(&self, action: &str, session: &Session) -> Option<TimerSnapshot> {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
        self.publish(session)
    }

    /// Latest published snapshot
    pub fn latest_snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
