//! Property-Based Test Generators
//!
//! Proptest strategies producing values that respect domain invariants:
//! policies with `start <= end`, non-negative amounts, ids that are unique
//! within a generated batch.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Amount, ClaimId, PolicyId, VehicleId};
use domain_claims::Claim;
use domain_policy::Policy;

use crate::fixtures::date;

/// Any date from 1900-01-01 to the end of 2199
pub fn any_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..109_572).prop_map(|offset| date(1900, 1, 1) + Duration::days(offset))
}

/// Dates within a few years of 2024, where the fixtures live
pub fn recent_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650).prop_map(|offset| date(2020, 1, 1) + Duration::days(offset))
}

/// Non-negative amounts with two decimal places, up to 1,000,000.00
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (0i64..100_000_000i64).prop_map(|cents| {
        Amount::new(Decimal::new(cents, 2)).unwrap_or_else(|e| panic!("generated amount: {}", e))
    })
}

/// A policy of `vehicle_id` lasting 1 to 730 days
pub fn policy_strategy(vehicle_id: VehicleId) -> impl Strategy<Value = Policy> {
    (1i64..10_000, recent_date_strategy(), 0i64..730).prop_map(move |(id, start, days)| Policy {
        id: PolicyId::new(id),
        vehicle_id,
        provider: None,
        start_date: start,
        end_date: start + Duration::days(days),
    })
}

/// A claim of `vehicle_id`
pub fn claim_strategy(vehicle_id: VehicleId) -> impl Strategy<Value = Claim> {
    (1i64..10_000, recent_date_strategy(), amount_strategy()).prop_map(move |(id, on, amount)| Claim {
        id: ClaimId::new(id),
        vehicle_id,
        claim_date: on,
        description: None,
        amount,
    })
}

/// Up to `max` policies of one vehicle with distinct ids
pub fn policies_strategy(vehicle_id: VehicleId, max: usize) -> impl Strategy<Value = Vec<Policy>> {
    proptest::collection::vec(policy_strategy(vehicle_id), 0..=max).prop_map(|policies| {
        policies
            .into_iter()
            .enumerate()
            .map(|(i, policy)| Policy {
                id: PolicyId::new(i as i64 + 1),
                ..policy
            })
            .collect()
    })
}

/// Up to `max` claims of one vehicle with distinct ids
pub fn claims_strategy(vehicle_id: VehicleId, max: usize) -> impl Strategy<Value = Vec<Claim>> {
    proptest::collection::vec(claim_strategy(vehicle_id), 0..=max).prop_map(|claims| {
        claims
            .into_iter()
            .enumerate()
            .map(|(i, claim)| Claim {
                id: ClaimId::new(i as i64 + 1),
                ..claim
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_policies_are_well_formed(policies in policies_strategy(VehicleId::new(1), 10)) {
            for policy in &policies {
                prop_assert!(policy.start_date <= policy.end_date);
                prop_assert!(policy.covers(policy.start_date));
            }
        }

        #[test]
        fn prop_amounts_are_non_negative(amount in amount_strategy()) {
            prop_assert!(amount.value() >= Decimal::ZERO);
        }
    }
}
