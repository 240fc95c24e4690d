//! Policy record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CoveragePeriod, PolicyId, VehicleId};

/// An insurance policy covering one vehicle
///
/// Both `start_date` and `end_date` are inclusive. `start_date <= end_date`
/// is expected from storage but not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Insured vehicle
    pub vehicle_id: VehicleId,
    /// Insurer name
    pub provider: Option<String>,
    /// First covered day
    pub start_date: NaiveDate,
    /// Last covered day
    pub end_date: NaiveDate,
}

impl Policy {
    /// The dates this policy covers
    pub fn coverage_period(&self) -> CoveragePeriod {
        CoveragePeriod::bounded(self.start_date, self.end_date)
    }

    /// Returns true if `date` falls within the policy's coverage
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.coverage_period().contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_covers_is_inclusive() {
        let policy = Policy {
            id: PolicyId::new(1),
            vehicle_id: VehicleId::new(1),
            provider: Some("Allianz".to_string()),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        };

        assert!(policy.covers(date(2024, 1, 1)));
        assert!(policy.covers(date(2024, 12, 31)));
        assert!(!policy.covers(date(2023, 12, 31)));
        assert!(!policy.covers(date(2025, 1, 1)));
    }
}
