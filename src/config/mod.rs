use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Longest trailing window accepted for REPORT_WINDOW_DAYS (about a century)
pub const MAX_WINDOW_DAYS: i64 = 36_500;

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
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!(
                "Invalid LOG_FORMAT: {}",
                other
            ))),
        }
    }
}

/// Settings for the report pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Root directory for per-request chart images and PDFs
    pub artifacts_dir: PathBuf,
    /// Length of the trailing window in days
    pub window_days: i64,
    /// Upper bound on one report generation, in seconds
    pub timeout_secs: u64,
    /// Table or view holding the flattened transaction rows
    pub source_table: String,
    /// Resolution used to map chart pixels to PDF page size
    pub image_dpi: f64,
    /// Keep the per-request artifact directory after responding
    pub keep_artifacts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("artifacts"),
            window_days: 30,
            timeout_secs: 120,
            source_table: "v3_full_report".to_string(),
            image_dpi: 150.0,
            keep_artifacts: false,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = ReportConfig::default();

        Ok(ReportConfig {
            artifacts_dir: env::var("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.artifacts_dir),
            window_days: parse_var("REPORT_WINDOW_DAYS", defaults.window_days)?,
            timeout_secs: parse_var("REPORT_TIMEOUT_SECS", defaults.timeout_secs)?,
            source_table: env::var("REPORT_SOURCE_TABLE").unwrap_or(defaults.source_table),
            image_dpi: parse_var("REPORT_IMAGE_DPI", defaults.image_dpi)?,
            keep_artifacts: parse_var("KEEP_ARTIFACTS", defaults.keep_artifacts)?,
        })
    }

    /// Validate report settings
    pub fn validate(&self) -> Result<()> {
        if self.window_days <= 0 {
            return Err(AppError::Configuration(
                "REPORT_WINDOW_DAYS must be greater than 0".to_string(),
            ));
        }

        if self.window_days > MAX_WINDOW_DAYS {
            return Err(AppError::Configuration(format!(
                "REPORT_WINDOW_DAYS must be at most {}",
                MAX_WINDOW_DAYS
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "REPORT_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if !(self.image_dpi > 0.0) {
            return Err(AppError::Configuration(
                "REPORT_IMAGE_DPI must be greater than 0".to_string(),
            ));
        }

        // The table name is spliced into SQL, so only plain identifiers pass
        let valid_table = !self.source_table.is_empty()
            && self
                .source_table
                .split('.')
                .all(|part| {
                    !part.is_empty()
                        && part
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                });
        if !valid_table {
            return Err(AppError::Configuration(format!(
                "Invalid REPORT_SOURCE_TABLE: {}",
                self.source_table
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            report: ReportConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        self.report.validate()
    }
}

/// Read an optional environment variable, falling back to `default` when unset
pub(crate) fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
