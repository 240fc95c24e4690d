//! Repository implementations for domain entities
//!
//! Repositories own the SQL. Each one exposes plain row structs decoded with
//! `sqlx::FromRow`; the adapters turn rows into domain types.
//!
//! Queries are built at runtime with `sqlx::query_as`, so the crate compiles
//! without a live database.

pub mod vehicle;
pub mod policy;
pub mod claims;

pub use vehicle::{VehicleRepository, VehicleRow, VehicleSummaryRow};
pub use policy::{PolicyRepository, PolicyRow};
pub use claims::{ClaimsRepository, ClaimRow, NewClaimRow};
