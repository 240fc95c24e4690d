//! Claims DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::money::AMOUNT_SCALE;
use domain_claims::Claim;

/// Largest amount the `NUMERIC(12, 2)` claims column holds
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(9_999_999_999.99);

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    pub claim_date: NaiveDate,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(custom(function = "storable_amount"))]
    pub amount: Decimal,
}

fn storable_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(ValidationError::new("negative_amount"));
    }
    if amount.round_dp(AMOUNT_SCALE) > MAX_CLAIM_AMOUNT {
        return Err(ValidationError::new("amount_too_large"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Decimal,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id.value(),
            car_id: claim.vehicle_id.value(),
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Decimal, description: Option<String>) -> CreateClaimRequest {
        CreateClaimRequest {
            claim_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            description,
            amount,
        }
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(request(dec!(0), None).validate().is_ok());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let errors = request(dec!(-0.01), None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_amount_up_to_column_limit_is_valid() {
        assert!(request(MAX_CLAIM_AMOUNT, None).validate().is_ok());
    }

    #[test]
    fn test_amount_beyond_column_limit_is_rejected() {
        let errors = request(dec!(10_000_000_000), None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_overlong_description_is_rejected() {
        let errors = request(dec!(10), Some("x".repeat(1001))).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }
}
