//! Session event background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::state::{AppState, SessionEvent};

/// Background task applying timer activity to the session.
///
/// Tick callbacks fire on the ticking task. This task moves them back onto
/// the session, handles rest completion and republishes the snapshot.
pub async fn session_event_task(
    state: Arc<AppState>,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
) {
    info!("Starting session event task");

    while let Some(event) = events.recv().await {
        if event != SessionEvent::Tick {
            debug!("Session event received: {:?}", event);
        }

        let mut session = state.session.lock().await;
        if let Err(e) = session.handle_event(event).await {
            error!("Failed to handle session event {:?}: {}", event, e);
        }
        state.publish(&session);
    }

    info!("Session event channel closed, stopping task");
}
