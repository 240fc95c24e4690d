//! Policy Domain
//!
//! A policy is a bounded date interval during which a vehicle is insured.
//! Policies are written by an external administration flow; this crate only
//! reads them to answer two questions:
//!
//! - **Validity**: is a vehicle covered on a given date?
//!   ([`ValidityEvaluator`])
//! - **Expiration**: which policies just expired? A background
//!   [`ExpirationScanner`] polls storage on a fixed cadence and notifies once
//!   per expired policy.
//!
//! # Scanner lifecycle
//!
//! ```text
//!            ┌──────── interval (30m) or backoff (5m) ────────┐
//!            ▼                                                 │
//!   Idle ──tick──► Scanning ──ok / error──────────────────────┘
//!     │
//!     └── cancel ──► Stopped
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{ExpirationScanner, ScannerConfig, ValidityEvaluator};
//!
//! let evaluator = ValidityEvaluator::new(vehicles.clone(), policies.clone());
//! let covered = evaluator.is_insurance_valid(vehicle_id, date).await?;
//!
//! let scanner = ExpirationScanner::new(policies, ScannerConfig::default());
//! let handle = scanner.spawn(shutdown_token.clone());
//! ```

pub mod policy;
pub mod ports;
pub mod validity;
pub mod expiration;
pub mod error;

pub use policy::Policy;
pub use ports::PolicyPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPolicyPort;
pub use validity::ValidityEvaluator;
pub use expiration::{
    ExpirationNotice, ExpirationNotifier, ExpirationScanner, ExpirationWindow,
    ProcessedExpirations, ScanReport, ScannerConfig, TracingNotifier,
};
pub use error::PolicyError;
