use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Upper bound for `REPORT_YEARS_BACK`
pub const MAX_YEARS_BACK: u32 = 50;

/// Reporting calendar and collaborator settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Whole-hour UTC offset used to decide what "today" is
    pub utc_offset_hours: i32,
    /// Requests on or before this day of month report on the previous month
    pub closing_day: u32,
    /// Upper bound on a single collaborator query
    pub query_timeout_secs: u64,
    /// Year-over-year covers `current - years_back ..= current`
    pub years_back: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 0,
            closing_day: 5,
            query_timeout_secs: 30,
            years_back: 3,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(AppError::Configuration(format!(
                    "Invalid LOG_FORMAT: {}",
                    other
                )))
            }
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            reports: ReportsConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.reports.validate()?;

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE must not exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ReportsConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(ReportsConfig {
            utc_offset_hours: parse_env("REPORT_UTC_OFFSET_HOURS", defaults.utc_offset_hours)?,
            closing_day: parse_env("REPORT_CLOSING_DAY", defaults.closing_day)?,
            query_timeout_secs: parse_env(
                "REPORT_QUERY_TIMEOUT_SECS",
                defaults.query_timeout_secs,
            )?,
            years_back: parse_env("REPORT_YEARS_BACK", defaults.years_back)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(AppError::Configuration(
                "REPORT_UTC_OFFSET_HOURS must be between -12 and 14".to_string(),
            ));
        }

        // 28 keeps the rule meaningful in February
        if !(1..=28).contains(&self.closing_day) {
            return Err(AppError::Configuration(
                "REPORT_CLOSING_DAY must be between 1 and 28".to_string(),
            ));
        }

        if !(1..=MAX_YEARS_BACK).contains(&self.years_back) {
            return Err(AppError::Configuration(format!(
                "REPORT_YEARS_BACK must be between 1 and {}",
                MAX_YEARS_BACK
            )));
        }

        if self.query_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "REPORT_QUERY_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
