//! PostgreSQL Claims Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{Amount, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError, VehicleId};
use domain_claims::{Claim, ClaimPort, NewClaim};

use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRow, ClaimsRepository, NewClaimRow};

/// PostgreSQL-backed implementation of `ClaimPort`
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-claim-adapter").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self), fields(vehicle_id = %vehicle_id))]
    async fn list_claims_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Vec<Claim>, PortError> {
        let rows = self.repository.find_by_car(vehicle_id.value()).await?;
        debug!(count = rows.len(), "Fetched claims");

        rows.into_iter().map(row_to_claim).collect()
    }

    #[instrument(skip(self, claim), fields(vehicle_id = %claim.vehicle_id))]
    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let row = NewClaimRow {
            car_id: claim.vehicle_id.value(),
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount.value(),
        };

        let stored = self.repository.insert(&row).await?;
        debug!(claim_id = stored.id, "Inserted claim");

        row_to_claim(stored)
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let amount = Amount::new(row.amount)
        .map_err(|e| DatabaseError::InvalidRow(format!("claim {}: {}", row.id, e)))?;

    Ok(Claim {
        id: ClaimId::new(row.id),
        vehicle_id: VehicleId::new(row.car_id),
        claim_date: row.claim_date,
        description: row.description,
        amount,
    })
}
