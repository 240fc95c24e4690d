//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub adapters: Vec<HealthCheckResult>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check: every storage adapter must report healthy
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (vehicles, policies, claims) = tokio::join!(
        state.vehicles.health_check(),
        state.policies.health_check(),
        state.claims.health_check(),
    );
    let adapters = vec![vehicles, policies, claims];

    let ready = adapters.iter().all(HealthCheckResult::is_healthy);
    if !ready {
        for adapter in adapters.iter().filter(|a| !a.is_healthy()) {
            warn!(
                adapter = %adapter.adapter_id,
                message = adapter.message.as_deref().unwrap_or(""),
                "Adapter not ready"
            );
        }
    }

    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let body = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        adapters,
    };

    (status, Json(body))
}
