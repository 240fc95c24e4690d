//! History errors

use thiserror::Error;

use core_kernel::{PortError, VehicleId};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] PortError),
}
