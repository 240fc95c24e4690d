//! Policy Domain Ports
//!
//! `PolicyPort` is the read side of policy storage. Policies are never
//! written through this port; they arrive from the policy administration
//! flow.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DomainPort, HealthCheckable, PortError, VehicleId};

use crate::policy::Policy;

/// Storage port for policies
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    /// Lists every policy of a vehicle, ordered by policy id
    async fn list_policies_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Policy>, PortError>;

    /// Finds policies whose end date satisfies `after < end_date <= up_to`
    ///
    /// # Arguments
    ///
    /// * `after` - Exclusive lower bound on the end date
    /// * `up_to` - Inclusive upper bound on the end date
    async fn find_expired_between(
        &self,
        after: NaiveDate,
        up_to: NaiveDate,
    ) -> Result<Vec<Policy>, PortError>;
}

/// In-memory implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult, PolicyId};

    /// In-memory mock implementation of PolicyPort
    #[derive(Debug, Default)]
    pub struct MockPolicyPort {
        policies: Arc<RwLock<BTreeMap<PolicyId, Policy>>>,
        unavailable: AtomicBool,
        expiry_queries: AtomicUsize,
    }

    impl MockPolicyPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies
        pub async fn with_policies(policies: Vec<Policy>) -> Self {
            let port = Self::new();
            for policy in policies {
                port.insert_policy(policy).await;
            }
            port
        }

        pub async fn insert_policy(&self, policy: Policy) {
            self.policies.write().await.insert(policy.id, policy);
        }

        /// Makes every subsequent call fail as if the store were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of `find_expired_between` calls received, failed ones included
        pub fn expiry_queries(&self) -> usize {
            self.expiry_queries.load(Ordering::SeqCst)
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("mock-policy-store"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl HealthCheckable for MockPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-policy-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn list_policies_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Policy>, PortError> {
            self.check_available()?;
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.vehicle_id == vehicle_id)
                .cloned()
                .collect())
        }

        async fn find_expired_between(
            &self,
            after: NaiveDate,
            up_to: NaiveDate,
        ) -> Result<Vec<Policy>, PortError> {
            self.expiry_queries.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.end_date > after && p.end_date <= up_to)
                .cloned()
                .collect())
        }
    }
}
