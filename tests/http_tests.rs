// Tests for the HTTP API, driven through the router without a socket

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use meeting_cost::http::{create_router, AppState};
use meeting_cost::timer::TimerConfig;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(TimerConfig {
        meeting_id: String::new(),
        tick_interval: Duration::from_secs(1),
        participants: 8,
        annual_salary: 85_000.0,
    }))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value)?),
        None => Body::empty(),
    };

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Ok((status, value))
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let (status, body) = send(&app(), "GET", "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
    Ok(())
}

#[tokio::test]
async fn test_calculate_cost_with_hourly_rate() -> Result<()> {
    let request = json!({
        "start": "2025-10-27T09:00:00Z",
        "end": "2025-10-27T10:30:00Z",
        "participants": 8,
        "hourly_rate": 50.0
    });

    let (status, body) = send(&app(), "POST", "/cost", Some(request)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total_cost"], 600.0);
    assert_eq!(body["result"]["duration_hours"], 1.5);
    assert_eq!(body["result"]["cost_per_person"], 75.0);
    assert_eq!(body["formatted"]["total_cost"], "$600.00");
    assert_eq!(body["formatted"]["duration"], "1 hour and 30 minutes");
    assert_eq!(body["formatted"]["cost_per_minute"], "$6.67/min");
    Ok(())
}

#[tokio::test]
async fn test_calculate_cost_with_annual_salary() -> Result<()> {
    let request = json!({
        "start": "2025-10-27T09:00:00Z",
        "end": "2025-10-27T10:00:00Z",
        "participants": 4,
        "annual_salary": 104000.0
    });

    let (status, body) = send(&app(), "POST", "/cost", Some(request)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourly_rate"], 50.0);
    assert_eq!(body["result"]["total_cost"], 200.0);
    Ok(())
}

#[tokio::test]
async fn test_calculate_cost_reversed_times_is_zero() -> Result<()> {
    let request = json!({
        "start": "2025-10-27T10:00:00Z",
        "end": "2025-10-27T09:00:00Z",
        "participants": 4,
        "hourly_rate": 50.0
    });

    let (status, body) = send(&app(), "POST", "/cost", Some(request)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total_cost"], 0.0);
    assert_eq!(body["formatted"]["duration"], "Less than a minute");
    Ok(())
}

#[tokio::test]
async fn test_calculate_cost_rejects_bad_input() -> Result<()> {
    let app = app();

    let both_rates = json!({
        "start": "2025-10-27T09:00:00Z",
        "end": "2025-10-27T10:00:00Z",
        "participants": 4,
        "hourly_rate": 50.0,
        "annual_salary": 104000.0
    });
    let (status, body) = send(&app, "POST", "/cost", Some(both_rates)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("exactly one"));

    let nobody = json!({
        "start": "2025-10-27T09:00:00Z",
        "end": "2025-10-27T10:00:00Z",
        "participants": 0,
        "hourly_rate": 50.0
    });
    let (status, _) = send(&app, "POST", "/cost", Some(nobody)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_hourly_rate() -> Result<()> {
    let (status, body) = send(&app(), "GET", "/rate/104000", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourly_rate"], 50.0);
    Ok(())
}

#[tokio::test]
async fn test_hourly_rate_rejects_non_positive_salary() -> Result<()> {
    let app = app();

    for uri in ["/rate/0", "/rate/-5000", "/rate/NaN", "/rate/inf"] {
        let (status, body) = send(&app, "GET", uri, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "annual_salary must be a positive number");
    }

    Ok(())
}

#[tokio::test]
async fn test_meeting_lifecycle() -> Result<()> {
    let app = app();

    // Create with config defaults for salary
    let (status, body) = send(
        &app,
        "POST",
        "/meetings",
        Some(json!({ "meeting_id": "standup", "participants": 5 })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["stats"]["participants"], 5);
    assert_eq!(body["stats"]["annual_salary"], 85000.0);

    let (status, _) = send(&app, "POST", "/meetings", Some(json!({ "meeting_id": "standup" }))).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Start
    let (status, body) = send(&app, "POST", "/meetings/standup/start", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["stats"]["recomputations"], 1);
    assert!(body["stats"]["started_at"].is_string());

    let (status, _) = send(&app, "POST", "/meetings/standup/start", None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Change inputs while running
    let (status, body) = send(
        &app,
        "PUT",
        "/meetings/standup/inputs",
        Some(json!({ "participants": 7 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["participants"], 7);
    assert_eq!(body["annual_salary"], 85000.0);
    assert_eq!(body["is_running"], true);

    let (status, _) = send(
        &app,
        "PUT",
        "/meetings/standup/inputs",
        Some(json!({ "annual_salary": -1.0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Stop
    let (status, body) = send(&app, "POST", "/meetings/standup/stop", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["stats"]["is_running"], false);

    let (status, _) = send(&app, "POST", "/meetings/standup/stop", None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", "/meetings/standup/status", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meeting_id"], "standup");
    assert_eq!(body["is_running"], false);

    // Delete
    let (status, body) = send(&app, "DELETE", "/meetings/standup", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, _) = send(&app, "GET", "/meetings/standup/status", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_partial_input_updates() -> Result<()> {
    let app = app();
    send(&app, "POST", "/meetings", Some(json!({ "meeting_id": "retro" }))).await?;

    let (first, second) = tokio::join!(
        send(&app, "PUT", "/meetings/retro/inputs", Some(json!({ "participants": 3 }))),
        send(&app, "PUT", "/meetings/retro/inputs", Some(json!({ "annual_salary": 120000.0 }))),
    );
    assert_eq!(first?.0, StatusCode::OK);
    assert_eq!(second?.0, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/meetings/retro/status", None).await?;
    assert_eq!(body["participants"], 3);
    assert_eq!(body["annual_salary"], 120000.0);

    Ok(())
}

#[tokio::test]
async fn test_delete_stops_running_meeting() -> Result<()> {
    let app = app();

    let (status, body) = send(&app, "POST", "/meetings", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let meeting_id = body["meeting_id"].as_str().unwrap().to_string();
    assert!(meeting_id.starts_with("meeting-"));

    send(&app, "POST", &format!("/meetings/{}/start", meeting_id), None).await?;

    let (status, body) = send(&app, "DELETE", &format!("/meetings/{}", meeting_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["is_running"], false);

    Ok(())
}

#[tokio::test]
async fn test_unknown_meeting() -> Result<()> {
    let app = app();

    for (method, uri) in [
        ("POST", "/meetings/nope/start"),
        ("POST", "/meetings/nope/stop"),
        ("GET", "/meetings/nope/status"),
        ("DELETE", "/meetings/nope"),
    ] {
        let (status, body) = send(&app, method, uri, None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body["error"], "Meeting nope not found");
    }

    Ok(())
}
