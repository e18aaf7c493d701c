use std::env;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::export::{parse_columns, ExportColumn};
use crate::session::ResetScope;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    pub export: ExportConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Catalog source configuration
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

/// Session behavior configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub reset_scope: ResetScope,
}

/// Progress report configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub columns: Vec<ExportColumn>,
    pub dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let catalog = CatalogConfig {
            path: env::var("CATALOG_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        let session = SessionConfig {
            reset_scope: match env::var("RESET_SCOPE") {
                Ok(value) => value.parse().map_err(|e| AppError::Config {
                    message: format!("RESET_SCOPE: {}", e),
                })?,
                Err(_) => ResetScope::default(),
            },
        };

        let export = ExportConfig {
            columns: match env::var("EXPORT_COLUMNS") {
                Ok(value) => {
                    let columns = parse_columns(&value).map_err(|e| AppError::Config {
                        message: format!("EXPORT_COLUMNS: {}", e),
                    })?;
                    if columns.is_empty() {
                        return Err(AppError::Config {
                            message: "EXPORT_COLUMNS must name at least one column".to_string(),
                        });
                    }
                    columns
                }
                Err(_) => ExportColumn::ALL.to_vec(),
            },
            dir: PathBuf::from(env::var("EXPORT_DIR").unwrap_or_else(|_| ".".to_string())),
        };

        Ok(Config {
            logging,
            catalog,
            session,
            export,
        })
    }

    /// Load the configured catalog, falling back to the built-in one.
    pub fn load_catalog(&self) -> AppResult<Catalog> {
        match &self.catalog.path {
            Some(path) => Ok(Catalog::load(path)?),
            None => Ok(Catalog::builtin()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            columns: ExportColumn::ALL.to_vec(),
            dir: PathBuf::from("."),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            catalog: CatalogConfig::default(),
            session: SessionConfig::default(),
            export: ExportConfig::default(),
        }
    }
}
