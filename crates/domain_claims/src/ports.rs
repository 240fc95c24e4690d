//! Claims Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, VehicleId};

use crate::claim::{Claim, NewClaim};

/// Storage port for claims
#[async_trait]
pub trait ClaimPort: DomainPort + HealthCheckable {
    /// Lists every claim of a vehicle, ordered by claim id
    async fn list_claims_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Claim>, PortError>;

    /// Stores a claim as a single atomic insert
    ///
    /// # Returns
    ///
    /// The stored claim carrying its generated, non-zero id
    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError>;
}

/// In-memory implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, ClaimId, HealthCheckResult};

    /// In-memory mock implementation of ClaimPort
    ///
    /// Ids are assigned sequentially starting after the highest id seen.
    #[derive(Debug, Default)]
    pub struct MockClaimPort {
        claims: Arc<RwLock<BTreeMap<ClaimId, Claim>>>,
        unavailable: AtomicBool,
    }

    impl MockClaimPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with stored claims
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let port = Self::new();
            {
                let mut stored = port.claims.write().await;
                for claim in claims {
                    stored.insert(claim.id, claim);
                }
            }
            port
        }

        /// Makes every subsequent call fail as if the store were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("mock-claim-store"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockClaimPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-claim-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimPort for MockClaimPort {
        async fn list_claims_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Claim>, PortError> {
            self.check_available()?;
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.vehicle_id == vehicle_id)
                .cloned()
                .collect())
        }

        async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let next_id = claims.keys().next_back().map_or(1, |id| id.value() + 1);
            let stored = claim.into_claim(ClaimId::new(next_id));
            claims.insert(stored.id, stored.clone());
            Ok(stored)
        }
    }
}
