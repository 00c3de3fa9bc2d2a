//! HTTP interface.
//!
//! Three routes following the AgentCore runtime convention:
//! - `GET /health`: liveness with uptime and version
//! - `GET /ping`: readiness
//! - `POST /invocations`: free-text prompt in, ski plan out

use std::net::SocketAddr;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use pipeline::RunContext;
use trip_model::PlanningResult;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::orchestrator::TripPlanner;
use crate::prompt_parser;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    planner: TripPlanner,
    started_at: Instant,
    version: &'static str,
    environment: String,
}

impl AppState {
    pub fn new(planner: TripPlanner, environment: impl Into<String>) -> Self {
        Self {
            planner,
            started_at: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
            environment: environment.into(),
        }
    }
}

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct InvocationResponse {
    pub response: String,
    pub status: &'static str,
    pub metadata: InvocationMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationMetadata {
    pub location: String,
    pub skill_level: String,
    pub weather_info: String,
    pub resort_recommendations: String,
    pub gear_suggestions: String,
}

impl From<PlanningResult> for InvocationResponse {
    fn from(result: PlanningResult) -> Self {
        Self {
            response: result.final_plan,
            status: "success",
            metadata: InvocationMetadata {
                location: result.location,
                skill_level: result.skill_level,
                weather_info: result.weather_info,
                resort_recommendations: result.resort_recommendations,
                gear_suggestions: result.gear_suggestions,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub version: &'static str,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub time_of_last_update: i64,
}

// =============================================================================
// Handlers
// =============================================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        version: state.version,
        environment: state.environment.clone(),
    })
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "Healthy",
        time_of_last_update: Utc::now().timestamp(),
    })
}

async fn invocations(
    State(state): State<AppState>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> Result<Json<InvocationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::Validation(format!(
            "Invalid request body, expected {{\"prompt\": string}}: {}",
            rejection.body_text()
        ))
    })?;

    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::Validation("Prompt must not be empty".to_string()));
    }

    let trip = prompt_parser::parse(prompt);
    let context = RunContext::new("http");
    info!(
        "Invocation {}: location={}, skill_level={}",
        context.request_id(),
        trip.location,
        trip.skill_level
    );

    let result = state
        .planner
        .get_detailed_plan_with_context(&trip.location, trip.skill_level.as_str(), &context)
        .await
        .ok_or_else(|| {
            ApiError::Generation(format!(
                "Failed to generate ski plan (request {})",
                context.request_id()
            ))
        })?;

    Ok(Json(InvocationResponse::from(result)))
}

/// Build the router with all routes and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/invocations", post(invocations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C.
///
/// # Errors
/// Fails if the port cannot be bound.
pub async fn serve(config: &AppConfig, planner: TripPlanner) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        "Ski planner listening on {} (environment: {})",
        addr, config.environment
    );

    let app = router(AppState::new(planner, config.environment.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
