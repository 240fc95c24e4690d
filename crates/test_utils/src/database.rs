//! Database Test Utilities
//!
//! Starts a throwaway PostgreSQL container, applies the schema from
//! `migrations/` and optionally loads the fixture data set. Tests using it
//! need Docker and are marked `#[ignore]`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::fixtures::Fixtures;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "car_insurance_test";

const INITIAL_SCHEMA: &str = include_str!("../../../migrations/20240101000001_initial_schema.sql");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
///
/// The container stops when this value is dropped.
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails to apply
    pub async fn new() -> Result<Self, BoxError> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr("database system is ready to accept connections"))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        sqlx::raw_sql(INITIAL_SCHEMA).execute(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Starts a container and loads the fixture owners, cars and policies
    pub async fn seeded() -> Result<Self, BoxError> {
        let db = Self::new().await?;
        db.seed().await?;
        Ok(db)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts the fixture data set with its fixed ids
    pub async fn seed(&self) -> Result<(), BoxError> {
        for owner in Fixtures::owners() {
            sqlx::query("INSERT INTO owners (id, name, email) VALUES ($1, $2, $3)")
                .bind(owner.id.value())
                .bind(&owner.name)
                .bind(&owner.email)
                .execute(&self.pool)
                .await?;
        }

        for vehicle in Fixtures::vehicles() {
            sqlx::query(
                "INSERT INTO cars (id, vin, make, model, year_of_manufacture, owner_id) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(vehicle.id.value())
            .bind(&vehicle.vin)
            .bind(&vehicle.make)
            .bind(&vehicle.model)
            .bind(vehicle.year_of_manufacture)
            .bind(vehicle.owner_id.value())
            .execute(&self.pool)
            .await?;
        }

        for policy in Fixtures::policies() {
            sqlx::query(
                "INSERT INTO policies (id, car_id, provider, start_date, end_date) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(policy.id.value())
            .bind(policy.vehicle_id.value())
            .bind(&policy.provider)
            .bind(policy.start_date)
            .bind(policy.end_date)
            .execute(&self.pool)
            .await?;
        }

        // Explicit ids leave the sequences behind
        for table in ["owners", "cars", "policies"] {
            sqlx::query(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Clears all data from the database while preserving the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::query("TRUNCATE TABLE claims, policies, cars, owners RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
