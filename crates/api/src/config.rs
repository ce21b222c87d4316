use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use cookorder_storage::S3Config;
use sqlx::postgres::PgConnectOptions;

/// Configuration could not be loaded from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Longest lifetime S3 presigning accepts (one week).
pub const MAX_SIGNED_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Object storage settings for the dish photo bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    pub fn s3_config(&self) -> S3Config {
        S3Config {
            bucket: self.bucket.clone(),
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// Each entry is a valid header value.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of signed photo URLs in seconds (default: `3600`).
    pub signed_url_ttl_secs: u64,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `PG_HOST`                   | required                |
    /// | `PG_PORT`                   | `5432`                  |
    /// | `PG_USER`                   | required                |
    /// | `PG_PASSWORD`               | empty                   |
    /// | `PG_DATABASE`               | required                |
    /// | `STORAGE_BUCKET`            | required                |
    /// | `STORAGE_ENDPOINT`          | AWS default             |
    /// | `STORAGE_REGION`            | `auto`                  |
    /// | `STORAGE_ACCESS_KEY_ID`     | SDK credential chain    |
    /// | `STORAGE_SECRET_ACCESS_KEY` | SDK credential chain    |
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `8080`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `SIGNED_URL_TTL_SECS`       | `3600` (max one week)   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database = DatabaseConfig {
            host: required("PG_HOST")?,
            port: parse_or(get("PG_PORT"), "PG_PORT", 5432)?,
            user: required("PG_USER")?,
            password: get("PG_PASSWORD").unwrap_or_default(),
            database: required("PG_DATABASE")?,
        };

        let storage = StorageConfig {
            bucket: required("STORAGE_BUCKET")?,
            endpoint: get("STORAGE_ENDPOINT"),
            region: get("STORAGE_REGION").unwrap_or_else(|| "auto".into()),
            access_key_id: get("STORAGE_ACCESS_KEY_ID"),
            secret_access_key: get("STORAGE_SECRET_ACCESS_KEY"),
        };

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{bad}' is not a valid header value"),
            });
        }

        let signed_url_ttl_secs = parse_or(get("SIGNED_URL_TTL_SECS"), "SIGNED_URL_TTL_SECS", 3600)?;
        if signed_url_ttl_secs == 0 || signed_url_ttl_secs > MAX_SIGNED_URL_TTL_SECS {
            return Err(ConfigError::Invalid {
                var: "SIGNED_URL_TTL_SECS",
                reason: format!("must be between 1 and {MAX_SIGNED_URL_TTL_SECS}"),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(get("PORT"), "PORT", 8080)?,
            cors_origins,
            request_timeout_secs: parse_or(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30)?,
            signed_url_ttl_secs,
            database,
            storage,
        })
    }

    /// Lifetime of signed photo URLs.
    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl_secs)
    }
}

fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
