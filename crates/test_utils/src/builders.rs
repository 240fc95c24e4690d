//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Amount, ClaimId, OwnerId, PolicyId, VehicleId};
use domain_claims::{Claim, NewClaim};
use domain_policy::Policy;
use domain_vehicle::Vehicle;

use crate::fixtures::date;

/// Builder for test policies
///
/// Defaults to policy 1 of vehicle 1, covering calendar year 2024.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    id: PolicyId,
    vehicle_id: VehicleId,
    provider: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self {
            id: PolicyId::new(1),
            vehicle_id: VehicleId::new(1),
            provider: Some("Allianz".to_string()),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = PolicyId::new(id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = vehicle_id;
        self
    }

    pub fn provider(mut self, provider: Option<&str>) -> Self {
        self.provider = provider.map(str::to_string);
        self
    }

    /// Sets both ends of the coverage period, inclusive
    pub fn covering(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets only the end date, keeping the start
    pub fn ending(mut self, end: NaiveDate) -> Self {
        self.end_date = end;
        self
    }

    pub fn build(self) -> Policy {
        Policy {
            id: self.id,
            vehicle_id: self.vehicle_id,
            provider: self.provider,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Builder for test claims
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    id: ClaimId,
    vehicle_id: VehicleId,
    claim_date: NaiveDate,
    description: Option<String>,
    amount: Decimal,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(1),
            vehicle_id: VehicleId::new(1),
            claim_date: date(2024, 3, 15),
            description: Some("Rear bumper damage".to_string()),
            amount: dec!(1250.00),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = vehicle_id;
        self
    }

    pub fn on(mut self, claim_date: NaiveDate) -> Self {
        self.claim_date = claim_date;
        self
    }

    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    /// Sets the amount; a negative amount panics in `build`
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    fn checked_amount(&self) -> Amount {
        Amount::new(self.amount).unwrap_or_else(|e| panic!("invalid test amount: {}", e))
    }

    pub fn build(self) -> Claim {
        let amount = self.checked_amount();
        Claim {
            id: self.id,
            vehicle_id: self.vehicle_id,
            claim_date: self.claim_date,
            description: self.description,
            amount,
        }
    }

    /// Builds the insert request, without an id
    pub fn build_new(self) -> NewClaim {
        let amount = self.checked_amount();
        NewClaim {
            vehicle_id: self.vehicle_id,
            claim_date: self.claim_date,
            description: self.description,
            amount,
        }
    }
}

/// Builder for test vehicles
#[derive(Debug, Clone)]
pub struct VehicleBuilder {
    id: VehicleId,
    vin: String,
    make: Option<String>,
    model: Option<String>,
    year_of_manufacture: i32,
    owner_id: OwnerId,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleBuilder {
    pub fn new() -> Self {
        Self {
            id: VehicleId::new(1),
            vin: "VIN12345".to_string(),
            make: Some("Dacia".to_string()),
            model: Some("Logan".to_string()),
            year_of_manufacture: 2018,
            owner_id: OwnerId::new(1),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = VehicleId::new(id);
        self
    }

    pub fn vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            id: self.id,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner_id: self.owner_id,
        }
    }
}
