//! Car DTOs

use serde::{Deserialize, Serialize};

use domain_vehicle::VehicleSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarResponse {
    pub id: i64,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: i32,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<VehicleSummary> for CarResponse {
    fn from(summary: VehicleSummary) -> Self {
        let vehicle = summary.vehicle;
        Self {
            id: vehicle.id.value(),
            vin: vehicle.vin,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year_of_manufacture,
            owner_id: vehicle.owner_id.value(),
            owner_name: summary.owner_name,
            owner_email: summary.owner_email,
        }
    }
}

/// Query string of the validity check; `date` is parsed by the handler
#[derive(Debug, Deserialize)]
pub struct ValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceValidityResponse {
    pub car_id: i64,
    /// Date checked, as `YYYY-MM-DD`
    pub date: String,
    pub valid: bool,
}
