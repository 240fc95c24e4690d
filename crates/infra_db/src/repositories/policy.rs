//! Policy repository implementation
//!
//! Read-only: policies are written by the policy administration flow, not
//! through this service.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for insurance policies
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all policies of a car, ordered by policy id
    ///
    /// # Arguments
    ///
    /// * `car_id` - The car identifier
    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<PolicyRow>, DatabaseError> {
        let policies = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_date
            FROM policies
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }

    /// Retrieves policies whose end date falls in `(after, up_to]`
    ///
    /// # Arguments
    ///
    /// * `after` - Exclusive lower bound on `end_date`
    /// * `up_to` - Inclusive upper bound on `end_date`
    pub async fn find_ending_between(
        &self,
        after: NaiveDate,
        up_to: NaiveDate,
    ) -> Result<Vec<PolicyRow>, DatabaseError> {
        let policies = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_date
            FROM policies
            WHERE end_date > $1
              AND end_date <= $2
            ORDER BY end_date, id
            "#,
        )
        .bind(after)
        .bind(up_to)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }
}

/// Database row for a policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub car_id: i64,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
