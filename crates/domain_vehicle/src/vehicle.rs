//! Vehicle and owner types

use serde::{Deserialize, Serialize};

use core_kernel::{OwnerId, VehicleId};

/// The person a vehicle is registered to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: Option<String>,
}

/// An insured vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier
    pub id: VehicleId,
    /// Vehicle identification number
    pub vin: String,
    /// Manufacturer
    pub make: Option<String>,
    /// Model name
    pub model: Option<String>,
    /// Year of manufacture
    pub year_of_manufacture: i32,
    /// Registered owner
    pub owner_id: OwnerId,
}

/// A vehicle joined with its owner's contact details, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub vehicle: Vehicle,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl VehicleSummary {
    pub fn new(vehicle: Vehicle, owner: &Owner) -> Self {
        Self {
            vehicle,
            owner_name: owner.name.clone(),
            owner_email: owner.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_copies_owner_contact() {
        let owner = Owner {
            id: OwnerId::new(3),
            name: "Ana Pop".to_string(),
            email: Some("ana.pop@example.com".to_string()),
        };
        let vehicle = Vehicle {
            id: VehicleId::new(1),
            vin: "VIN12345".to_string(),
            make: Some("Dacia".to_string()),
            model: Some("Logan".to_string()),
            year_of_manufacture: 2018,
            owner_id: owner.id,
        };

        let summary = VehicleSummary::new(vehicle, &owner);
        assert_eq!(summary.owner_name, "Ana Pop");
        assert_eq!(summary.owner_email.as_deref(), Some("ana.pop@example.com"));
        assert_eq!(summary.vehicle.owner_id, OwnerId::new(3));
    }
}
