//! HTTP API Layer
//!
//! REST surface of the vehicle coverage services, built on Axum.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | liveness |
//! | GET | `/health/ready` | storage adapter readiness |
//! | GET | `/api/cars` | cars with their owners |
//! | GET | `/api/cars/:car_id/insurance-valid?date=YYYY-MM-DD` | validity on a date |
//! | POST | `/api/cars/:car_id/claims` | record a claim |
//! | GET | `/api/cars/:car_id/history` | policy and claim timeline |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(vehicles, policies, claims, timezone);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::Timezone;
use domain_claims::{ClaimPort, ClaimRecorder};
use domain_history::HistoryComposer;
use domain_policy::{PolicyPort, ValidityEvaluator};
use domain_vehicle::VehiclePort;

use crate::handlers::{cars, claims, health, history};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehiclePort>,
    pub policies: Arc<dyn PolicyPort>,
    pub claims: Arc<dyn ClaimPort>,
    pub validity: Arc<ValidityEvaluator>,
    pub recorder: Arc<ClaimRecorder>,
    pub history: Arc<HistoryComposer>,
}

impl AppState {
    /// Wires the domain services onto the given storage ports
    pub fn new(
        vehicles: Arc<dyn VehiclePort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
        timezone: Timezone,
    ) -> Self {
        let validity = ValidityEvaluator::new(vehicles.clone(), policies.clone()).with_timezone(timezone);
        let recorder = ClaimRecorder::new(vehicles.clone(), claims.clone());
        let history = HistoryComposer::new(vehicles.clone(), policies.clone(), claims.clone());

        Self {
            vehicles,
            policies,
            claims,
            validity: Arc::new(validity),
            recorder: Arc::new(recorder),
            history: Arc::new(history),
        }
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let car_routes = Router::new()
        .route("/", get(cars::list_cars))
        .route("/:car_id/insurance-valid", get(cars::insurance_valid))
        .route("/:car_id/claims", post(claims::create_claim))
        .route("/:car_id/history", get(history::get_history));

    let api_routes = Router::new()
        .nest("/cars", car_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
