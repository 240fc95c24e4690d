//! Vehicle Domain Ports
//!
//! `VehiclePort` is what the coverage services need from vehicle storage:
//! resolve a vehicle by id, and list vehicles with their owners.
//!
//! ```rust,ignore
//! let vehicle = vehicles
//!     .find_vehicle(vehicle_id)
//!     .await?
//!     .ok_or(PolicyError::VehicleNotFound(vehicle_id))?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, VehicleId};

use crate::vehicle::{Vehicle, VehicleSummary};

/// Storage port for vehicles
#[async_trait]
pub trait VehiclePort: DomainPort + HealthCheckable {
    /// Looks up a vehicle
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no vehicle has this id; `Err` only when the store
    /// could not answer
    async fn find_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError>;

    /// Lists every vehicle joined with its owner, ordered by vehicle id
    async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, PortError>;
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
    use core_kernel::{AdapterHealth, HealthCheckResult, OwnerId};

    use crate::vehicle::Owner;

    /// In-memory mock implementation of VehiclePort
    #[derive(Debug, Default)]
    pub struct MockVehiclePort {
        owners: Arc<RwLock<BTreeMap<OwnerId, Owner>>>,
        vehicles: Arc<RwLock<BTreeMap<VehicleId, Vehicle>>>,
        unavailable: AtomicBool,
    }

    impl MockVehiclePort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with owners and vehicles
        pub async fn with_data(owners: Vec<Owner>, vehicles: Vec<Vehicle>) -> Self {
            let port = Self::new();
            for owner in owners {
                port.insert_owner(owner).await;
            }
            for vehicle in vehicles {
                port.insert_vehicle(vehicle).await;
            }
            port
        }

        pub async fn insert_owner(&self, owner: Owner) {
            self.owners.write().await.insert(owner.id, owner);
        }

        pub async fn insert_vehicle(&self, vehicle: Vehicle) {
            self.vehicles.write().await.insert(vehicle.id, vehicle);
        }

        /// Makes every subsequent call fail as if the store were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("mock-vehicle-store"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockVehiclePort {}

    #[async_trait]
    impl HealthCheckable for MockVehiclePort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-vehicle-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl VehiclePort for MockVehiclePort {
        async fn find_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError> {
            self.check_available()?;
            Ok(self.vehicles.read().await.get(&id).cloned())
        }

        async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, PortError> {
            self.check_available()?;
            let owners = self.owners.read().await;
            let vehicles = self.vehicles.read().await;

            vehicles
                .values()
                .map(|vehicle| {
                    let owner = owners
                        .get(&vehicle.owner_id)
                        .ok_or_else(|| PortError::not_found("Owner", vehicle.owner_id))?;
                    Ok(VehicleSummary::new(vehicle.clone(), owner))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockVehiclePort;
    use super::*;
    use core_kernel::OwnerId;

    use crate::vehicle::Owner;

    fn owner(id: i64, name: &str) -> Owner {
        Owner {
            id: OwnerId::new(id),
            name: name.to_string(),
            email: None,
        }
    }

    fn vehicle(id: i64, owner_id: i64) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id),
            vin: format!("VIN{:05}", id),
            make: None,
            model: None,
            year_of_manufacture: 2020,
            owner_id: OwnerId::new(owner_id),
        }
    }

    #[tokio::test]
    async fn test_find_vehicle_absent_is_none() {
        let port = MockVehiclePort::new();
        assert_eq!(port.find_vehicle(VehicleId::new(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_vehicles_ordered_by_id() {
        let port = MockVehiclePort::with_data(
            vec![owner(1, "Ana"), owner(2, "Bogdan")],
            vec![vehicle(2, 2), vehicle(1, 1)],
        )
        .await;

        let listed = port.list_vehicles().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|s| s.vehicle.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(listed[1].owner_name, "Bogdan");
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_and_reports_unhealthy() {
        let port = MockVehiclePort::new();
        port.set_unavailable(true);

        let err = port.find_vehicle(VehicleId::new(1)).await.unwrap_err();
        assert!(err.is_transient());
        assert!(!port.health_check().await.is_healthy());
    }
}
