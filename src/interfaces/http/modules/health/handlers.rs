//! `GET /health`

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Error,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Reachability of a backing component
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl ComponentHealth {
    async fn database(db: &DatabaseConnection) -> Self {
        let start = Instant::now();
        match db.ping().await {
            Ok(()) => Self {
                status: HealthStatus::Ok,
                latency_ms: Some(start.elapsed().as_millis() as u64),
            },
            Err(e) => {
                warn!("Database ping failed: {}", e);
                Self {
                    status: HealthStatus::Error,
                    latency_ms: None,
                }
            }
        }
    }
}

/// Liveness probe
///
/// Unlike the `/api` routes this answers 503 when the database is down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ComponentHealth::database(&state.db).await;
    let (status, code) = match database.status {
        HealthStatus::Ok => (HealthStatus::Ok, StatusCode::OK),
        _ => (HealthStatus::Degraded, StatusCode::SERVICE_UNAVAILABLE),
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
    };
    (code, Json(body))
}
