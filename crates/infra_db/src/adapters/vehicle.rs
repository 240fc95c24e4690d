//! PostgreSQL Vehicle Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, OwnerId, PortError, VehicleId};
use domain_vehicle::{Vehicle, VehiclePort, VehicleSummary};

use crate::repositories::vehicle::{VehicleRepository, VehicleRow, VehicleSummaryRow};

/// PostgreSQL-backed implementation of `VehiclePort`
#[derive(Debug, Clone)]
pub struct PostgresVehicleAdapter {
    repository: VehicleRepository,
    pool: PgPool,
}

impl PostgresVehicleAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresVehicleAdapter {}

#[async_trait]
impl HealthCheckable for PostgresVehicleAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-vehicle-adapter").await
    }
}

#[async_trait]
impl VehiclePort for PostgresVehicleAdapter {
    #[instrument(skip(self), fields(vehicle_id = %id))]
    async fn find_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError> {
        debug!("Fetching vehicle by ID");

        let row = self.repository.find_by_id(id.value()).await?;
        Ok(row.map(row_to_vehicle))
    }

    #[instrument(skip(self))]
    async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, PortError> {
        let rows = self.repository.list_with_owners().await?;
        debug!(count = rows.len(), "Listed vehicles");

        Ok(rows.into_iter().map(row_to_summary).collect())
    }
}

fn row_to_vehicle(row: VehicleRow) -> Vehicle {
    Vehicle {
        id: VehicleId::new(row.id),
        vin: row.vin,
        make: row.make,
        model: row.model,
        year_of_manufacture: row.year_of_manufacture,
        owner_id: OwnerId::new(row.owner_id),
    }
}

fn row_to_summary(row: VehicleSummaryRow) -> VehicleSummary {
    VehicleSummary {
        vehicle: row_to_vehicle(row.vehicle),
        owner_name: row.owner_name,
        owner_email: row.owner_email,
    }
}
