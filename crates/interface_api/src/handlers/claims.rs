//! Claims handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{Amount, VehicleId};

use crate::dto::claims::{ClaimResponse, CreateClaimRequest};
use crate::error::ApiError;
use crate::AppState;

/// Records a claim against a car
pub async fn create_claim(
    State(state): State<AppState>,
    car_id: Result<Path<i64>, PathRejection>,
    request: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let Path(car_id) = car_id?;
    let Json(request) = request?;
    request.validate()?;

    let amount = Amount::new(request.amount).map_err(|e| ApiError::Validation(e.to_string()))?;

    let claim = state
        .recorder
        .create_claim(VehicleId::new(car_id), request.claim_date, request.description, amount)
        .await?;

    Ok((StatusCode::CREATED, Json(ClaimResponse::from(claim))))
}
