//! Coverage validity evaluation
//!
//! Answers "is this vehicle insured on this date?" from the vehicle's stored
//! policies.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use core_kernel::{DateGuard, Timezone, VehicleId};
use domain_vehicle::VehiclePort;

use crate::error::PolicyError;
use crate::ports::PolicyPort;

/// Service deciding whether a vehicle has an active policy on a date
///
/// Checks run in a fixed order: the vehicle must exist, then the date must
/// pass the [`DateGuard`], then policies are consulted. The evaluator has no
/// side effects.
pub struct ValidityEvaluator {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
    guard: DateGuard,
    timezone: Timezone,
}

impl ValidityEvaluator {
    /// Creates an evaluator with the default date guard and UTC calendar
    pub fn new(vehicles: Arc<dyn VehiclePort>, policies: Arc<dyn PolicyPort>) -> Self {
        Self {
            vehicles,
            policies,
            guard: DateGuard::default(),
            timezone: Timezone::default(),
        }
    }

    /// Replaces the accepted date range
    pub fn with_guard(mut self, guard: DateGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Sets the timezone used to decide what "today" is
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Returns true if at least one policy of the vehicle covers `date`
    ///
    /// # Errors
    ///
    /// * `PolicyError::VehicleNotFound` - no vehicle with this id
    /// * `PolicyError::InvalidDateRange` - `date` is before 1900 or more than
    ///   ten years after today
    /// * `PolicyError::Storage` - the store could not answer
    pub async fn is_insurance_valid(&self, vehicle_id: VehicleId, date: NaiveDate) -> Result<bool, PolicyError> {
        self.is_insurance_valid_at(vehicle_id, date, self.timezone.today()).await
    }

    /// Same as [`is_insurance_valid`](Self::is_insurance_valid) with an explicit reference day
    pub async fn is_insurance_valid_at(
        &self,
        vehicle_id: VehicleId,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<bool, PolicyError> {
        if self.vehicles.find_vehicle(vehicle_id).await?.is_none() {
            return Err(PolicyError::VehicleNotFound(vehicle_id));
        }

        let date = self.guard.check(date, today)?;

        let policies = self.policies.list_policies_for_vehicle(vehicle_id).await?;
        let valid = policies.iter().any(|policy| policy.covers(date));

        debug!(
            vehicle_id = %vehicle_id,
            %date,
            policies = policies.len(),
            valid,
            "Evaluated insurance validity"
        );

        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{OwnerId, PolicyId};
    use domain_vehicle::{MockVehiclePort, Owner, Vehicle};

    use crate::policy::Policy;
    use crate::ports::mock::MockPolicyPort;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(id: i64, vehicle: i64, start: NaiveDate, end: NaiveDate) -> Policy {
        Policy {
            id: PolicyId::new(id),
            vehicle_id: VehicleId::new(vehicle),
            provider: Some("Groupama".to_string()),
            start_date: start,
            end_date: end,
        }
    }

    async fn setup(policies: Vec<Policy>) -> (ValidityEvaluator, Arc<MockVehiclePort>, Arc<MockPolicyPort>) {
        let owner = Owner {
            id: OwnerId::new(1),
            name: "Ana Pop".to_string(),
            email: None,
        };
        let vehicle = Vehicle {
            id: VehicleId::new(1),
            vin: "VIN12345".to_string(),
            make: Some("Dacia".to_string()),
            model: Some("Logan".to_string()),
            year_of_manufacture: 2018,
            owner_id: owner.id,
        };
        let vehicles = Arc::new(MockVehiclePort::with_data(vec![owner], vec![vehicle]).await);
        let policy_port = Arc::new(MockPolicyPort::with_policies(policies).await);
        let evaluator = ValidityEvaluator::new(vehicles.clone(), policy_port.clone());
        (evaluator, vehicles, policy_port)
    }

    #[tokio::test]
    async fn test_date_within_policy_is_valid() {
        let (evaluator, _, _) = setup(vec![policy(1, 1, date(2024, 1, 1), date(2024, 12, 31))]).await;
        let today = date(2024, 6, 1);

        assert!(evaluator.is_insurance_valid_at(VehicleId::new(1), date(2024, 6, 1), today).await.unwrap());
        assert!(evaluator.is_insurance_valid_at(VehicleId::new(1), date(2024, 1, 1), today).await.unwrap());
        assert!(evaluator.is_insurance_valid_at(VehicleId::new(1), date(2024, 12, 31), today).await.unwrap());
    }

    #[tokio::test]
    async fn test_date_outside_policy_is_invalid() {
        let (evaluator, _, _) = setup(vec![policy(1, 1, date(2024, 1, 1), date(2024, 12, 31))]).await;
        let today = date(2024, 6, 1);

        assert!(!evaluator.is_insurance_valid_at(VehicleId::new(1), date(2023, 12, 31), today).await.unwrap());
        assert!(!evaluator.is_insurance_valid_at(VehicleId::new(1), date(2025, 1, 1), today).await.unwrap());
    }

    #[tokio::test]
    async fn test_gap_between_policies_is_invalid() {
        let (evaluator, _, _) = setup(vec![
            policy(1, 1, date(2023, 1, 1), date(2023, 6, 30)),
            policy(2, 1, date(2023, 8, 1), date(2023, 12, 31)),
        ])
        .await;
        let today = date(2024, 1, 1);

        assert!(!evaluator.is_insurance_valid_at(VehicleId::new(1), date(2023, 7, 15), today).await.unwrap());
        assert!(evaluator.is_insurance_valid_at(VehicleId::new(1), date(2023, 8, 1), today).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_vehicles_policies_are_ignored() {
        let (evaluator, _, _) = setup(vec![policy(1, 2, date(2024, 1, 1), date(2024, 12, 31))]).await;

        let valid = evaluator
            .is_insurance_valid_at(VehicleId::new(1), date(2024, 6, 1), date(2024, 6, 1))
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_not_found() {
        let (evaluator, _, _) = setup(vec![]).await;

        let err = evaluator
            .is_insurance_valid_at(VehicleId::new(9999), date(2024, 6, 1), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::VehicleNotFound(id) if id == VehicleId::new(9999)));
    }

    #[tokio::test]
    async fn test_not_found_reported_before_date_range() {
        let (evaluator, _, _) = setup(vec![]).await;

        let err = evaluator
            .is_insurance_valid_at(VehicleId::new(9999), date(1850, 1, 1), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_date_before_1900_rejected() {
        let (evaluator, _, _) = setup(vec![]).await;

        let err = evaluator
            .is_insurance_valid_at(VehicleId::new(1), date(1899, 12, 31), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::InvalidDateRange(_)));
        assert!(err.to_string().contains("1900"));
    }

    #[tokio::test]
    async fn test_date_too_far_in_future_rejected() {
        let (evaluator, _, _) = setup(vec![]).await;
        let far_future = Timezone::default().today() + chrono::Months::new(11 * 12);

        let err = evaluator
            .is_insurance_valid(VehicleId::new(1), far_future)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("10 years"));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let (evaluator, _, policies) = setup(vec![]).await;
        policies.set_unavailable(true);

        let err = evaluator
            .is_insurance_valid_at(VehicleId::new(1), date(2024, 6, 1), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::Storage(_)));
    }

    #[tokio::test]
    async fn test_vehicle_store_failure_propagates() {
        let (evaluator, vehicles, _) = setup(vec![]).await;
        vehicles.set_unavailable(true);

        let err = evaluator
            .is_insurance_valid_at(VehicleId::new(1), date(2024, 6, 1), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::Storage(_)));
    }
}
