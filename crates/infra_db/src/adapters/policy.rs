//! PostgreSQL Policy Adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError, VehicleId};
use domain_policy::{Policy, PolicyPort};

use crate::repositories::policy::{PolicyRepository, PolicyRow};

/// PostgreSQL-backed implementation of `PolicyPort`
///
/// Shared by the request path and the expiration scanner.
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-policy-adapter").await
    }
}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip(self), fields(vehicle_id = %vehicle_id))]
    async fn list_policies_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Policy>, PortError> {
        let rows = self.repository.find_by_car(vehicle_id.value()).await?;
        debug!(count = rows.len(), "Fetched policies");

        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self))]
    async fn find_expired_between(
        &self,
        after: NaiveDate,
        up_to: NaiveDate,
    ) -> Result<Vec<Policy>, PortError> {
        let rows = self.repository.find_ending_between(after, up_to).await?;
        debug!(count = rows.len(), "Fetched expired policies");

        Ok(rows.into_iter().map(row_to_policy).collect())
    }
}

fn row_to_policy(row: PolicyRow) -> Policy {
    Policy {
        id: PolicyId::new(row.id),
        vehicle_id: VehicleId::new(row.car_id),
        provider: row.provider,
        start_date: row.start_date,
        end_date: row.end_date,
    }
}
