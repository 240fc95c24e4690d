//! Pre-built Test Fixtures
//!
//! One small, fixed data set used across the suite: two owners, three cars
//! and four policies. Car 1 is insured for the whole of 2024 and 2025, car 2
//! from March to September 2024, car 3 never.

use std::sync::Arc;

use chrono::NaiveDate;

use core_kernel::{OwnerId, PolicyId, VehicleId};
use domain_claims::MockClaimPort;
use domain_policy::{MockPolicyPort, Policy};
use domain_vehicle::{MockVehiclePort, Owner, Vehicle};

/// Shorthand for a calendar date; panics on an invalid date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
}

/// Fixture for the reference data set
pub struct Fixtures;

impl Fixtures {
    pub const INSURED_CAR: VehicleId = VehicleId::new(1);
    pub const PARTLY_INSURED_CAR: VehicleId = VehicleId::new(2);
    pub const UNINSURED_CAR: VehicleId = VehicleId::new(3);
    pub const MISSING_CAR: VehicleId = VehicleId::new(9999);

    pub fn owners() -> Vec<Owner> {
        vec![
            Owner {
                id: OwnerId::new(1),
                name: "Ana Pop".to_string(),
                email: Some("ana.pop@example.com".to_string()),
            },
            Owner {
                id: OwnerId::new(2),
                name: "Bogdan Ionescu".to_string(),
                email: None,
            },
        ]
    }

    pub fn vehicles() -> Vec<Vehicle> {
        vec![
            Vehicle {
                id: Self::INSURED_CAR,
                vin: "VIN12345".to_string(),
                make: Some("Dacia".to_string()),
                model: Some("Logan".to_string()),
                year_of_manufacture: 2018,
                owner_id: OwnerId::new(1),
            },
            Vehicle {
                id: Self::PARTLY_INSURED_CAR,
                vin: "VIN67890".to_string(),
                make: Some("VW".to_string()),
                model: Some("Golf".to_string()),
                year_of_manufacture: 2021,
                owner_id: OwnerId::new(1),
            },
            Vehicle {
                id: Self::UNINSURED_CAR,
                vin: "VIN24680".to_string(),
                make: None,
                model: None,
                year_of_manufacture: 2010,
                owner_id: OwnerId::new(2),
            },
        ]
    }

    pub fn policies() -> Vec<Policy> {
        vec![
            Policy {
                id: PolicyId::new(1),
                vehicle_id: Self::INSURED_CAR,
                provider: Some("Allianz".to_string()),
                start_date: date(2024, 1, 1),
                end_date: date(2024, 12, 31),
            },
            Policy {
                id: PolicyId::new(2),
                vehicle_id: Self::INSURED_CAR,
                provider: Some("Groupama".to_string()),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
            },
            Policy {
                id: PolicyId::new(3),
                vehicle_id: Self::PARTLY_INSURED_CAR,
                provider: Some("Allianz".to_string()),
                start_date: date(2024, 3, 1),
                end_date: date(2024, 9, 30),
            },
            Policy {
                id: PolicyId::new(4),
                vehicle_id: Self::PARTLY_INSURED_CAR,
                provider: None,
                start_date: date(2023, 1, 1),
                end_date: date(2023, 6, 30),
            },
        ]
    }
}

/// In-memory ports loaded with the fixture data set
#[derive(Debug, Clone)]
pub struct MockStore {
    pub vehicles: Arc<MockVehiclePort>,
    pub policies: Arc<MockPolicyPort>,
    pub claims: Arc<MockClaimPort>,
}

impl MockStore {
    /// Empty store
    pub fn empty() -> Self {
        Self {
            vehicles: Arc::new(MockVehiclePort::new()),
            policies: Arc::new(MockPolicyPort::new()),
            claims: Arc::new(MockClaimPort::new()),
        }
    }

    /// Store with the fixture owners, cars and policies and no claims
    pub async fn seeded() -> Self {
        Self {
            vehicles: Arc::new(MockVehiclePort::with_data(Fixtures::owners(), Fixtures::vehicles()).await),
            policies: Arc::new(MockPolicyPort::with_policies(Fixtures::policies()).await),
            claims: Arc::new(MockClaimPort::new()),
        }
    }

    /// Makes every port fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.vehicles.set_unavailable(unavailable);
        self.policies.set_unavailable(unavailable);
        self.claims.set_unavailable(unavailable);
    }
}
