//! Vehicle repository implementation

use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for cars and their owners
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a car by its identifier
    ///
    /// # Returns
    ///
    /// `None` when no car has this id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<VehicleRow>, DatabaseError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, vin, make, model, year_of_manufacture, owner_id
            FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists every car joined with its owner, ordered by car id
    pub async fn list_with_owners(&self) -> Result<Vec<VehicleSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, VehicleSummaryRow>(
            r#"
            SELECT
                c.id,
                c.vin,
                c.make,
                c.model,
                c.year_of_manufacture,
                c.owner_id,
                o.name AS owner_name,
                o.email AS owner_email
            FROM cars c
            JOIN owners o ON o.id = c.owner_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for a car
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleRow {
    pub id: i64,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
}

/// Database row for a car joined with its owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleSummaryRow {
    #[sqlx(flatten)]
    pub vehicle: VehicleRow,
    pub owner_name: String,
    pub owner_email: Option<String>,
}
