//! Claims domain errors

use thiserror::Error;

use core_kernel::{PortError, VehicleId};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] PortError),
}
