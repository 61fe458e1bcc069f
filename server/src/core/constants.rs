// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "jobly";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "jobly.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "JOBLY_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for the log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "JOBLY_LOG";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for PostgreSQL connection URL
pub const ENV_DATABASE_URL: &str = "JOBLY_DATABASE_URL";

/// Conventional fallback for the PostgreSQL connection URL
pub const ENV_DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

/// Environment variable selecting bound (true) or interpolated (false) filter values
pub const ENV_FILTERS_BIND_VALUES: &str = "JOBLY_FILTERS_BIND_VALUES";

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// PostgreSQL default max connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL default min connections (keep warm for low latency)
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// PostgreSQL default connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// PostgreSQL idle connection timeout in seconds (release unused connections)
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// PostgreSQL max connection lifetime in seconds
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// PostgreSQL statement timeout in seconds (0 = disabled)
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;
