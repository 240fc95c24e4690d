//! API configuration
//!
//! Values come from `API_`-prefixed environment variables layered over
//! defaults. Nested sections use `__`, e.g. `API_SCANNER__INTERVAL_SECS=900`.

use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

use core_kernel::{TemporalError, Timezone};
use domain_policy::ScannerConfig;
use infra_db::DatabaseConfig;

/// Configuration failures, reported once at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("timezone: {0}")]
    Timezone(#[from] TemporalError),

    #[error("{0}")]
    Invalid(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Connections the pool keeps open
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// IANA zone defining "today" for date checks
    pub timezone: String,
    /// Expiration scanner settings
    pub scanner: ScannerSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/car_insurance".to_string(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 10 * 60,
            max_lifetime_secs: 30 * 60,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            timezone: "UTC".to_string(),
            scanner: ScannerSettings::default(),
        }
    }
}

/// Expiration scanner settings, in plain seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    pub enabled: bool,
    pub interval_secs: u64,
    pub error_backoff_secs: u64,
    pub lookback_secs: i64,
    pub dedup_capacity: usize,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30 * 60,
            error_backoff_secs: 5 * 60,
            lookback_secs: 60 * 60,
            dedup_capacity: 1000,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// The `API_` environment source with `__` as the nesting separator
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("API")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured timezone
    pub fn timezone(&self) -> Result<Timezone, ConfigError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }

    /// Pool settings for the storage adapters
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_lifetime: Duration::from_secs(self.max_lifetime_secs),
        }
    }

    /// Builds the scanner configuration
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` if a period is zero or the lookback is out of
    /// range, `ConfigError::Timezone` if the timezone is unknown
    pub fn scanner_config(&self) -> Result<ScannerConfig, ConfigError> {
        let settings = &self.scanner;
        if settings.interval_secs == 0 || settings.error_backoff_secs == 0 {
            return Err(ConfigError::Invalid(
                "scanner interval and error backoff must be positive".to_string(),
            ));
        }
        let lookback = TimeDelta::try_seconds(settings.lookback_secs)
            .filter(|lookback| *lookback > TimeDelta::zero())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "scanner lookback of {}s is out of range",
                    settings.lookback_secs
                ))
            })?;

        Ok(ScannerConfig {
            interval: Duration::from_secs(settings.interval_secs),
            error_backoff: Duration::from_secs(settings.error_backoff_secs),
            lookback,
            dedup_capacity: settings.dedup_capacity,
            timezone: self.timezone()?,
        })
    }
}
