//! TaskPomodoro - a headless Pomodoro work/rest timer
//!
//! This is the main entry point for the task-pomodoro daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use task_pomodoro::{
    api::create_router,
    config::Config,
    services::{check_notifier_available, select_notifier},
    state::AppState,
    tasks::session_event_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("task_pomodoro={},tower_http=info", config.log_level()))
        .init();

    let rest_config = config.rest_config();
    info!("Starting task-pomodoro v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, min_rest={}min, ratio={}min rest per {}min work",
        config.host,
        config.port,
        rest_config.min_rest_minutes,
        rest_config.rest_ratio,
        rest_config.work_ratio
    );

    // Notifications are best effort, a missing tool only costs the popups
    if let Err(e) = check_notifier_available(config.notifier).await {
        warn!("{}", e);
    }
    let notifier = select_notifier(config.notifier);

    // Create application state
    let (state, events) = AppState::new(config.port, config.host.clone(), rest_config, notifier);
    let state = Arc::new(state);

    // Start the session event background task
    let event_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_event_task(event_state, events).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /work        - Show a fresh work phase");
    info!("  POST /work/start  - Start the work timer");
    info!("  POST /pause       - Pause or resume the running timer");
    info!("  POST /rest        - Go resting with the earned rest time");
    info!("  POST /rest/start  - Start the rest countdown");
    info!("  POST /rest/skip   - Skip rest and go back to work");
    info!("  POST /stop        - Stop and reset everything");
    info!("  GET  /status      - Current timer snapshot");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.session.lock().await.shutdown().await {
        warn!("Failed to stop timer cleanly: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
