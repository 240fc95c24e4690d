//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! vehicle coverage test suite.
//!
//! # Modules
//!
//! - `fixtures`: The reference data set and a seeded in-memory store
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL testcontainer helpers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
