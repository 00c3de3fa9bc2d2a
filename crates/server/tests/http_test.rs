//! End-to-end tests for the HTTP interface.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; model
//! calls go to stub executors so no network access is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use llm_client::{GenerationError, PromptExecutor};
use serde_json::Value;
use server::{AppConfig, TripPlanner};
use server::http::{AppState, router};
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Answers every stage with a short label derived from its system instruction
struct StubExecutor;

#[async_trait]
impl PromptExecutor for StubExecutor {
    async fn execute(&self, system: &str, _user: &str) -> Result<String, GenerationError> {
        let label = if system.contains("trip planner") {
            "final itinerary"
        } else if system.contains("weather analyst") {
            "weather report"
        } else if system.contains("travel advisor") {
            "resort picks"
        } else {
            "gear list"
        };
        Ok(label.to_string())
    }
}

struct FailingExecutor;

#[async_trait]
impl PromptExecutor for FailingExecutor {
    async fn execute(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
        Err(GenerationError::MissingCredentials)
    }
}

fn app(executor: Arc<dyn PromptExecutor>) -> axum::Router {
    router(AppState::new(TripPlanner::new(executor), "test"))
}

fn invocation(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/invocations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Health and Readiness
// ============================================================================

#[tokio::test]
async fn test_health_is_ok_even_when_generation_fails() {
    let response = app(Arc::new(FailingExecutor))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ping_reports_healthy() {
    let response = app(Arc::new(StubExecutor))
        .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "Healthy");
    assert!(body["time_of_last_update"].as_i64().unwrap() > 0);
}

// ============================================================================
// Invocations
// ============================================================================

#[tokio::test]
async fn test_invocation_returns_plan_and_metadata() {
    let response = app(Arc::new(StubExecutor))
        .oneshot(invocation(r#"{"prompt":"Plan a ski trip to Aspen for beginners"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "final itinerary");
    assert_eq!(body["metadata"]["location"], "Aspen");
    assert_eq!(body["metadata"]["skillLevel"], "beginner");
    assert_eq!(body["metadata"]["weatherInfo"], "weather report");
    assert_eq!(body["metadata"]["resortRecommendations"], "resort picks");
    assert_eq!(body["metadata"]["gearSuggestions"], "gear list");
}

#[tokio::test]
async fn test_invocation_ambiguous_prompt_uses_defaults() {
    let response = app(Arc::new(StubExecutor))
        .oneshot(invocation(r#"{"prompt":"help me plan something fun"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["metadata"]["location"], "general area");
    assert_eq!(body["metadata"]["skillLevel"], "intermediate");
}

#[tokio::test]
async fn test_invocation_missing_prompt_is_bad_request() {
    let response = app(Arc::new(StubExecutor))
        .oneshot(invocation(r#"{"question":"where should I ski?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["response"].is_string());
}

#[tokio::test]
async fn test_invocation_rejects_malformed_bodies() {
    for body in ["not json", r#"{"prompt": 42}"#, r#"{"prompt": "   "}"#] {
        let response = app(Arc::new(StubExecutor))
            .oneshot(invocation(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json_body(response).await["status"], "error");
    }
}

#[tokio::test]
async fn test_invocation_generation_failure_is_server_error() {
    let response = app(Arc::new(FailingExecutor))
        .oneshot(invocation(r#"{"prompt":"Plan a ski trip to Aspen"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(
        body["response"]
            .as_str()
            .unwrap()
            .starts_with("Failed to generate ski plan")
    );
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_serve_reports_bind_failure() {
    let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port();
    let config = AppConfig {
        port,
        ..AppConfig::default()
    };

    let err = server::http::serve(&config, TripPlanner::new(Arc::new(StubExecutor)))
        .await
        .unwrap_err();

    assert!(
        format!("{err:#}").contains("Failed to bind"),
        "unexpected error: {err:#}"
    );
}
