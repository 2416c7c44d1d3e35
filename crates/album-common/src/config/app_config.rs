//! Application configuration structs
//!
//! Everything comes from environment variables, with a .env file honored
//! when present. Only the values without a sane default (the port, the
//! connection URLs, the JWT secret) are required.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "defaults::app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "defaults::db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "defaults::db_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "defaults::redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration for owner sessions
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "defaults::token_expiry_secs")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "defaults::requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "defaults::burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Blob storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "defaults::media_dir")]
    pub media_dir: String,
    /// Base URL prepended to blob keys when resolving public URLs
    #[serde(default = "defaults::public_base_url")]
    pub public_base_url: String,
    #[serde(default = "defaults::max_file_size_mb")]
    pub max_file_size_mb: u32,
}

impl StorageConfig {
    /// Maximum accepted upload size in bytes
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

mod defaults {
    pub fn app_name() -> String {
        "album-server".to_string()
    }
    pub fn host() -> String {
        "127.0.0.1".to_string()
    }
    pub fn db_max_connections() -> u32 {
        20
    }
    pub fn db_min_connections() -> u32 {
        5
    }
    pub fn redis_max_connections() -> u32 {
        10
    }
    pub fn token_expiry_secs() -> i64 {
        3600
    }
    pub fn requests_per_second() -> u32 {
        10
    }
    pub fn burst() -> u32 {
        50
    }
    pub fn media_dir() -> String {
        "./media".to_string()
    }
    pub fn public_base_url() -> String {
        "/media".to_string()
    }
    pub fn max_file_size_mb() -> u32 {
        50
    }
}

/// A parseable optional variable, falling back to the given default
fn var_or<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}

/// A required variable
fn var_required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real env vars still apply
        let _ = dotenvy::dotenv();

        let port: u16 = env::var("API_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .ok_or(ConfigError::MissingVar("API_PORT"))?;

        Ok(Self {
            app: AppSettings {
                name: var_or("APP_NAME", defaults::app_name()),
                env: var_or("APP_ENV", Environment::default()),
            },
            api: ServerConfig {
                host: var_or("API_HOST", defaults::host()),
                port,
            },
            database: DatabaseConfig {
                url: var_required("DATABASE_URL")?,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", defaults::db_max_connections()),
                min_connections: var_or("DATABASE_MIN_CONNECTIONS", defaults::db_min_connections()),
            },
            redis: RedisConfig {
                url: var_required("REDIS_URL")?,
                max_connections: var_or("REDIS_MAX_CONNECTIONS", defaults::redis_max_connections()),
            },
            jwt: JwtConfig {
                secret: var_required("JWT_SECRET")?,
                access_token_expiry: var_or("JWT_ACCESS_TOKEN_EXPIRY", defaults::token_expiry_secs()),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: var_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    defaults::requests_per_second(),
                ),
                burst: var_or("RATE_LIMIT_BURST", defaults::burst()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|raw| raw.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                media_dir: var_or("MEDIA_DIR", defaults::media_dir()),
                public_base_url: var_or("MEDIA_PUBLIC_BASE_URL", defaults::public_base_url()),
                max_file_size_mb: var_or("MAX_FILE_SIZE_MB", defaults::max_file_size_mb()),
            },
            snowflake: SnowflakeConfig {
                worker_id: var_or("WORKER_ID", 0),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
