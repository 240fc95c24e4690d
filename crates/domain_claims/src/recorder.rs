//! Claim recording

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::{Amount, VehicleId};
use domain_vehicle::VehiclePort;

use crate::claim::{Claim, NewClaim};
use crate::error::ClaimError;
use crate::ports::ClaimPort;

/// Service that appends claims to a vehicle's record
///
/// Claim dates are not range-checked: a claim may describe an event from
/// any point in the past.
pub struct ClaimRecorder {
    vehicles: Arc<dyn VehiclePort>,
    claims: Arc<dyn ClaimPort>,
}

impl ClaimRecorder {
    pub fn new(vehicles: Arc<dyn VehiclePort>, claims: Arc<dyn ClaimPort>) -> Self {
        Self { vehicles, claims }
    }

    /// Stores a new claim for an existing vehicle
    ///
    /// # Errors
    ///
    /// * `ClaimError::VehicleNotFound` - no vehicle with this id
    /// * `ClaimError::Storage` - the store could not answer or the insert failed
    pub async fn create_claim(
        &self,
        vehicle_id: VehicleId,
        claim_date: NaiveDate,
        description: Option<String>,
        amount: Amount,
    ) -> Result<Claim, ClaimError> {
        if self.vehicles.find_vehicle(vehicle_id).await?.is_none() {
            return Err(ClaimError::VehicleNotFound(vehicle_id));
        }

        let claim = self
            .claims
            .insert_claim(NewClaim {
                vehicle_id,
                claim_date,
                description,
                amount,
            })
            .await?;

        info!(
            claim_id = %claim.id,
            vehicle_id = %vehicle_id,
            claim_date = %claim.claim_date,
            amount = %claim.amount,
            "Insurance claim recorded"
        );

        Ok(claim)
    }
}
