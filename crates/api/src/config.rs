use std::str::FromStr;

use axum::http::HeaderValue;

/// Origins accepted by the default allow-list.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://eclectic-cascaron-641d77.netlify.app",
    "http://localhost:3000",
];

/// Which cross-origin callers are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Only the listed origins (exact match).
    AllowList(Vec<String>),
    /// Any origin; used by the serverless deployment.
    AllowAll,
}

impl CorsPolicy {
    /// Whether a request declaring `origin` may proceed.
    pub fn allows(&self, origin: &str) -> bool {
        match self {
            CorsPolicy::AllowAll => true,
            CorsPolicy::AllowList(origins) => origins.iter().any(|o| o == origin),
        }
    }
}

/// Where products are persisted.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

// The URL may carry credentials, so it is never printed.
impl std::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres {
                max_connections, ..
            } => f
                .debug_struct("Postgres")
                .field("max_connections", max_connections)
                .finish_non_exhaustive(),
            StoreBackend::Memory => f.write_str("Memory"),
        }
    }
}

/// When the store connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    /// On the first request that needs it.
    Lazy,
    /// At startup, before the listener is bound.
    Eager,
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    pub store: StoreBackend,
    pub connect_mode: ConnectMode,
    pub cors: CorsPolicy,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `5000`                           |
    /// | `STORE_BACKEND`        | `postgres` (or `memory`)         |
    /// | `DATABASE_URL`         | required for `postgres`          |
    /// | `DB_MAX_CONNECTIONS`   | `5`                              |
    /// | `DB_CONNECT`           | `lazy` (or `eager`)              |
    /// | `CORS_MODE`            | `allow-list` (or `allow-all`)    |
    /// | `CORS_ORIGINS`         | [`DEFAULT_ALLOWED_ORIGINS`]      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 5000, "a port number")?;
        let request_timeout_secs: u64 =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "a number of seconds")?;

        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5, "a positive integer")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                    expected: "'postgres' or 'memory'",
                })
            }
        };

        let connect_mode = match lookup("DB_CONNECT").as_deref().unwrap_or("lazy") {
            "lazy" => ConnectMode::Lazy,
            "eager" => ConnectMode::Eager,
            other => {
                return Err(ConfigError::Invalid {
                    key: "DB_CONNECT",
                    value: other.to_string(),
                    expected: "'lazy' or 'eager'",
                })
            }
        };

        let cors = match lookup("CORS_MODE").as_deref().unwrap_or("allow-list") {
            "allow-all" => CorsPolicy::AllowAll,
            "allow-list" => {
                let origins: Vec<String> = match lookup("CORS_ORIGINS") {
                    Some(raw) => raw
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                    None => DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
                };
                if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
                    return Err(ConfigError::InvalidOrigin(bad.clone()));
                }
                CorsPolicy::AllowList(origins)
            }
            other => {
                return Err(ConfigError::Invalid {
                    key: "CORS_MODE",
                    value: other.to_string(),
                    expected: "'allow-list' or 'allow-all'",
                })
            }
        };

        Ok(Self {
            host,
            port,
            store,
            connect_mode,
            cors,
            request_timeout_secs,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        }),
    }
}
