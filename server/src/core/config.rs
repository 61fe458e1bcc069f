use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filters::FilterMode;

use super::constants::{
    CONFIG_FILE_NAME, ENV_DATABASE_URL, ENV_DATABASE_URL_FALLBACK, ENV_FILTERS_BIND_VALUES,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_MAX_CONNECTIONS, POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// File Config (JSON)
// =============================================================================

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
    pub statement_timeout_secs: Option<u64>,
}

/// Search filter configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FiltersFileConfig {
    /// Bind filter values as parameters instead of interpolating them
    pub bind_values: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub database: Option<DatabaseFileConfig>,
    pub filters: Option<FiltersFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Environment Overrides
// =============================================================================

/// Values read from the environment, applied over the file config
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub database_url: Option<String>,
    pub bind_values: Option<bool>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var(ENV_DATABASE_URL)
            .or_else(|_| std::env::var(ENV_DATABASE_URL_FALLBACK))
            .ok()
            .filter(|url| !url.is_empty());

        let bind_values = match std::env::var(ENV_FILTERS_BIND_VALUES) {
            Ok(raw) => Some(parse_bool(&raw).with_context(|| {
                format!("Invalid value for {}: {}", ENV_FILTERS_BIND_VALUES, raw)
            })?),
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            bind_values,
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

// =============================================================================
// Runtime Config
// =============================================================================

/// PostgreSQL configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// PostgreSQL connection URL (empty when only compiling clauses offline)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep warm
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,
    /// Max connection lifetime in seconds
    pub max_lifetime_secs: u64,
    /// Statement timeout in seconds (0 = disabled)
    pub statement_timeout_secs: u64,
}

/// Search filter configuration (final/runtime)
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    pub mode: FilterMode,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: PostgresConfig,
    pub filters: FilterConfig,
}

impl AppConfig {
    /// Load configuration
    ///
    /// Priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. Config file (explicit path, or `jobly.json` in the working directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() { Some(local) } else { None }
            }
        };

        let file_config = match path {
            Some(path) => {
                let config = FileConfig::load_from_file(&path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };

        Self::from_sources(file_config, EnvOverrides::from_env()?)
    }

    /// Build the runtime config from already-loaded sources
    pub fn from_sources(file: FileConfig, env: EnvOverrides) -> Result<Self> {
        let file_db = file.database.unwrap_or_default();
        let file_filters = file.filters.unwrap_or_default();

        let database = PostgresConfig {
            url: env.database_url.or(file_db.url).unwrap_or_default(),
            max_connections: file_db
                .max_connections
                .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
            min_connections: file_db
                .min_connections
                .unwrap_or(POSTGRES_DEFAULT_MIN_CONNECTIONS),
            acquire_timeout_secs: file_db
                .acquire_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout_secs: file_db
                .idle_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime_secs: file_db
                .max_lifetime_secs
                .unwrap_or(POSTGRES_DEFAULT_MAX_LIFETIME_SECS),
            statement_timeout_secs: file_db
                .statement_timeout_secs
                .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
        };

        let bind_values = env.bind_values.or(file_filters.bind_values).unwrap_or(true);
        let filters = FilterConfig {
            mode: FilterMode::from_bind_values(bind_values),
        };
        if filters.mode == FilterMode::Literal {
            tracing::warn!("Filter values will be interpolated into SQL (filters.bind_values = false)");
        }

        let config = Self { database, filters };
        config.validate()?;
        tracing::debug!(
            max_connections = config.database.max_connections,
            filter_mode = ?config.filters.mode,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            anyhow::bail!("Configuration error: database.max_connections must be greater than 0");
        }
        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Configuration error: database.min_connections ({}) cannot exceed database.max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }
        Ok(())
    }
}
