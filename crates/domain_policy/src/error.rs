//! Policy domain errors

use thiserror::Error;

use core_kernel::{PortError, TemporalError, VehicleId};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The referenced vehicle does not exist
    #[error("Vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    /// The requested date is outside the accepted range
    #[error("{0}")]
    InvalidDateRange(#[from] TemporalError),

    /// The policy store could not answer
    #[error("Storage unavailable: {0}")]
    Storage(#[from] PortError),
}

impl PolicyError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PolicyError::VehicleNotFound(_))
    }
}
