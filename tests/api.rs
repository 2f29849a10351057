use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use task_pomodoro::{
    api::create_router,
    services::LogNotifier,
    state::{AppPage, AppState},
    tasks::session_event_task,
    timer::RestConfig,
};
use tower::ServiceExt;

fn app() -> (Router, Arc<AppState>) {
    let (state, events) = AppState::new(
        20554,
        "127.0.0.1".to_string(),
        RestConfig::default(),
        Arc::new(LogNotifier),
    );
    let state = Arc::new(state);
    tokio::spawn(session_event_task(Arc::clone(&state), events));
    (create_router(Arc::clone(&state)), state)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (app, _state) = app();
    let (status, body) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn status_starts_on_the_starting_page() {
    let (app, _state) = app();
    let (status, body) = call(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["page"], "starting");
    assert_eq!(body["timer"]["display"], "00:00:00");
    assert_eq!(body["timer"]["controller"]["status"], "idle");
    assert_eq!(body["rest_config"]["work_ratio"], 25);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn invalid_transition_is_a_conflict() {
    let (app, _state) = app();

    let (status, body) = call(&app, "POST", "/rest/start").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["page"], "starting");

    let (status, _) = call(&app, "POST", "/pause").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn work_session_ticks_and_pauses() {
    let (app, state) = app();
    let snapshots = state.subscribe();

    let (status, body) = call(&app, "POST", "/work").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["page"], "working");

    let (status, _) = call(&app, "POST", "/work/start").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", "/work/start").await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["elapsed_seconds"], 2);
    assert_eq!(body["timer"]["display"], "00:00:02");
    assert_eq!(body["last_action"], "work/start");
    assert_eq!(snapshots.borrow().elapsed_seconds, 2);

    let (_, body) = call(&app, "POST", "/pause").await;
    assert_eq!(body["message"], "Timer paused");
    assert_eq!(body["timer"]["controller"]["status"], "paused");
    assert_eq!(body["timer"]["controller"]["mode"], "work");

    tokio::time::sleep(Duration::from_secs(3)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["elapsed_seconds"], 2);

    let (_, body) = call(&app, "POST", "/pause").await;
    assert_eq!(body["message"], "Timer resumed");

    let (status, body) = call(&app, "POST", "/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["page"], "starting");
    assert_eq!(body["timer"]["elapsed_seconds"], 0);
    assert_eq!(body["timer"]["controller"]["status"], "stopped");
}

#[tokio::test(start_paused = true)]
async fn completed_rest_returns_to_a_fresh_work_phase() {
    let (app, state) = app();

    call(&app, "POST", "/work").await;
    call(&app, "POST", "/work/start").await;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let (status, body) = call(&app, "POST", "/rest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["page"], "resting");
    assert_eq!(body["timer"]["rest_seconds"], 300);
    assert_eq!(body["timer"]["display"], "00:05:00");
    assert_eq!(body["message"], "Rest earned: 00:05:00");

    let (status, _) = call(&app, "POST", "/rest/start").await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(299_500)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["page"], "resting");
    assert_eq!(body["timer"]["rest_seconds"], 1);

    tokio::time::sleep(Duration::from_secs(1)).await;

    let session = state.session.lock().await;
    assert_eq!(session.page(), AppPage::Working);
    let timer = session.timer().unwrap();
    assert_eq!(timer.elapsed_seconds, 0);
    assert_eq!(timer.rest_seconds, 0);
    assert!(!timer.is_running);
}

#[tokio::test(start_paused = true)]
async fn skipping_rest_resets_to_working() {
    let (app, _state) = app();

    call(&app, "POST", "/work").await;
    call(&app, "POST", "/rest").await;
    call(&app, "POST", "/rest/start").await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let (status, body) = call(&app, "POST", "/rest/skip").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["page"], "working");
    assert_eq!(body["timer"]["rest_seconds"], 0);
    assert_eq!(body["timer"]["is_running"], false);
}
