//! History handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use core_kernel::VehicleId;

use crate::dto::history::CarHistoryResponse;
use crate::error::ApiError;
use crate::AppState;

/// Returns a car's policies and claims as one ordered timeline
pub async fn get_history(
    State(state): State<AppState>,
    car_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CarHistoryResponse>, ApiError> {
    let Path(car_id) = car_id?;
    let history = state.history.get_history(VehicleId::new(car_id)).await?;
    Ok(Json(CarHistoryResponse::from(history)))
}
