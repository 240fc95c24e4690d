//! Core Kernel - Foundational types for the vehicle coverage system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly-typed identifiers for vehicles, owners, policies and claims
//! - Non-negative monetary amounts with precise decimal arithmetic
//! - Date guards, coverage periods and timezone-aware "today"
//! - Port abstractions for swappable storage adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Amount, MoneyError};
pub use temporal::{CoveragePeriod, DateGuard, TemporalError, Timezone};
pub use identifiers::{VehicleId, OwnerId, PolicyId, ClaimId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
