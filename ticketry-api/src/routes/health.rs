//! Service health checks mounted under `/health`.
//!
//! `ping` and `live` never touch the database. `ready` runs one query through
//! the pool and answers 503 when that fails. Check bodies are plain JSON, not
//! the entity envelope.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::time::Instant;

use crate::db::DbClient;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Up,
    Down,
}

impl CheckState {
    fn status_code(self) -> StatusCode {
        match self {
            CheckState::Up => StatusCode::OK,
            CheckState::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Liveness {
    pub state: CheckState,
    pub version: String,
}

/// What `/health/ready` reports about the pool and its database.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Readiness {
    pub state: CheckState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
    /// Connections currently held by the pool, idle or checked out.
    pub pool_size: usize,
    pub uptime_seconds: u64,
}

/// GET /health/ping
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses((status = 200, description = "Always answers pong", body = String)),
))]
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health/live
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is serving requests", body = Liveness)),
))]
pub async fn live() -> Json<Liveness> {
    Json(Liveness {
        state: CheckState::Up,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ready
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = Readiness),
        (status = 503, description = "Database unreachable or pool closed", body = Readiness),
    ),
))]
pub async fn ready(
    State(db): State<DbClient>,
    State(started_at): State<Instant>,
) -> (StatusCode, Json<Readiness>) {
    let check_started = Instant::now();
    let outcome = db.health_check().await;
    let latency_ms = u64::try_from(check_started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (state, database_latency_ms, database_error) = match outcome {
        Ok(()) => (CheckState::Up, Some(latency_ms), None),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (CheckState::Down, None, Some(e.message))
        }
    };

    let report = Readiness {
        state,
        database_latency_ms,
        database_error,
        pool_size: db.pool_size(),
        uptime_seconds: started_at.elapsed().as_secs(),
    };
    (state.status_code(), Json(report))
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(live))
        .route("/ready", get(ready))
}
