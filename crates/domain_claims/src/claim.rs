//! Claim record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, ClaimId, VehicleId};

/// A stored insurance claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier, assigned by storage
    pub id: ClaimId,
    /// Vehicle the claim is filed against
    pub vehicle_id: VehicleId,
    /// Date of the insured event
    pub claim_date: NaiveDate,
    /// Free-text description
    pub description: Option<String>,
    /// Claimed amount
    pub amount: Amount,
}

/// A claim that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub vehicle_id: VehicleId,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Amount,
}

impl NewClaim {
    /// Attaches the storage-assigned id
    pub fn into_claim(self, id: ClaimId) -> Claim {
        Claim {
            id,
            vehicle_id: self.vehicle_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }
}
