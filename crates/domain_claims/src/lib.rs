//! Claims Domain
//!
//! A claim records an insurance event for a vehicle on a date, with an
//! optional description and a non-negative amount. Claims are append-only:
//! [`ClaimRecorder`] creates them and nothing modifies them afterwards.
//!
//! Recording is not idempotent. Submitting the same claim twice stores two
//! claims; deduplication is the caller's concern.

pub mod claim;
pub mod ports;
pub mod recorder;
pub mod error;

pub use claim::{Claim, NewClaim};
pub use ports::ClaimPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimPort;
pub use recorder::ClaimRecorder;
pub use error::ClaimError;
