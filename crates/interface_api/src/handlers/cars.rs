//! Car handlers

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;

use core_kernel::VehicleId;

use crate::dto::cars::{CarResponse, InsuranceValidityResponse, ValidityQuery};
use crate::error::{ApiError, INVALID_DATE_FORMAT};
use crate::AppState;

/// Lists every car with its owner
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.vehicles.list_vehicles().await?;

    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Reports whether a car is insured on the requested date
pub async fn insurance_valid(
    State(state): State<AppState>,
    car_id: Result<Path<i64>, PathRejection>,
    Query(query): Query<ValidityQuery>,
) -> Result<Json<InsuranceValidityResponse>, ApiError> {
    let Path(car_id) = car_id?;
    let date = query
        .date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| ApiError::BadRequest(INVALID_DATE_FORMAT.to_string()))?;

    let valid = state
        .validity
        .is_insurance_valid(VehicleId::new(car_id), date)
        .await?;

    Ok(Json(InsuranceValidityResponse {
        car_id,
        date: date.format("%Y-%m-%d").to_string(),
        valid,
    }))
}
