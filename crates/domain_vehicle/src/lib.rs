//! Vehicle Domain
//!
//! Vehicles are the subject of every coverage question: policies and claims
//! both hang off a vehicle. This crate holds the vehicle and owner types and
//! the `VehiclePort` other domains use to check that a vehicle exists.
//!
//! Vehicles are read-only here; they are created by an external registration
//! flow and owned by the storage layer.

pub mod vehicle;
pub mod ports;

pub use vehicle::{Owner, Vehicle, VehicleSummary};
pub use ports::VehiclePort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockVehiclePort;
