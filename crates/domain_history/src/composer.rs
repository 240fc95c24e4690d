//! History composition

use std::sync::Arc;

use tracing::debug;

use core_kernel::VehicleId;
use domain_claims::ClaimPort;
use domain_policy::PolicyPort;
use domain_vehicle::VehiclePort;

use crate::error::HistoryError;
use crate::timeline::{merge_timeline, VehicleHistory};

/// Service that assembles a vehicle's history from storage
pub struct HistoryComposer {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
    claims: Arc<dyn ClaimPort>,
}

impl HistoryComposer {
    pub fn new(
        vehicles: Arc<dyn VehiclePort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
    ) -> Self {
        Self {
            vehicles,
            policies,
            claims,
        }
    }

    /// Returns every policy and claim of the vehicle, oldest first
    ///
    /// # Errors
    ///
    /// * `HistoryError::VehicleNotFound` - no vehicle with this id
    /// * `HistoryError::Storage` - the store could not answer
    pub async fn get_history(&self, vehicle_id: VehicleId) -> Result<VehicleHistory, HistoryError> {
        let vehicle = self
            .vehicles
            .find_vehicle(vehicle_id)
            .await?
            .ok_or(HistoryError::VehicleNotFound(vehicle_id))?;

        let policies = self.policies.list_policies_for_vehicle(vehicle_id).await?;
        let claims = self.claims.list_claims_for_vehicle(vehicle_id).await?;

        debug!(
            vehicle_id = %vehicle_id,
            policies = policies.len(),
            claims = claims.len(),
            "Composing vehicle history"
        );

        Ok(VehicleHistory {
            vehicle_id: vehicle.id,
            vin: vehicle.vin,
            timeline: merge_timeline(policies, claims),
        })
    }
}
