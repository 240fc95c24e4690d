//! Claims repository implementation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for insurance claims
///
/// Claims are append-only; there is no update or delete.
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all claims of a car, ordered by claim id
    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<ClaimRow>, DatabaseError> {
        let claims = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, car_id, claim_date, description, amount
            FROM claims
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(claims)
    }

    /// Inserts a claim in a single statement
    ///
    /// # Returns
    ///
    /// The stored row, including the generated id
    pub async fn insert(&self, claim: &NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (car_id, claim_date, description, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, car_id, claim_date, description, amount
            "#,
        )
        .bind(claim.car_id)
        .bind(claim.claim_date)
        .bind(&claim.description)
        .bind(claim.amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Decimal,
}

/// Data for inserting a new claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Decimal,
}
