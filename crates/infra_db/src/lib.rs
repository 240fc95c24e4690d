//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the vehicle coverage services, using SQLx.
//!
//! # Architecture
//!
//! Two layers, following the repository pattern:
//!
//! - **Repositories** own the SQL and return plain row structs.
//! - **Adapters** implement the domain ports (`VehiclePort`, `PolicyPort`,
//!   `ClaimPort`) on top of the repositories and translate rows into domain
//!   types and `DatabaseError` into `PortError`.
//!
//! The schema lives in `migrations/` at the workspace root.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresClaimAdapter};
//!
//! let pool = create_pool(&DatabaseConfig::new("postgres://localhost/car_insurance")).await?;
//! let claims: Arc<dyn ClaimPort> = Arc::new(PostgresClaimAdapter::new(pool));
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresClaimAdapter, PostgresPolicyAdapter, PostgresVehicleAdapter};
