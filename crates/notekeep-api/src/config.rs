//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `NOTE_STORE` | `memory` (`memory`, `postgres`, `rest`) |
//! | `DATABASE_URL` | `postgres://localhost/notekeep` |
//! | `DATA_SERVICE_URL` / `DATA_SERVICE_API_KEY` | required for `rest` |
//! | `REQUEST_TIMEOUT_SECS` | `5` |
//! | `SEED_SAMPLE_NOTES` | `false` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `LOG_FORMAT` / `LOG_FILE` / `LOG_ANSI` | `text` / stdout / auto |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use notekeep_core::{defaults, Error, Result};

/// Which note store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
    Rest,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "rest" | "data-service" => Ok(StoreBackend::Rest),
            other => Err(Error::Config(format!(
                "unknown NOTE_STORE '{}' (expected memory, postgres or rest)",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
            StoreBackend::Rest => "rest",
        };
        f.write_str(name)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Config(format!(
                "unknown LOG_FORMAT '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Log to this file (daily rotation) instead of stdout.
    pub file: Option<String>,
    /// Force ANSI colors on or off; auto-detected when `None`.
    pub ansi: Option<bool>,
}

/// Credentials for the hosted data service.
#[derive(Clone)]
pub struct DataServiceConfig {
    pub url: String,
    pub api_key: String,
}

impl fmt::Debug for DataServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataServiceConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: String,
    pub data_service: Option<DataServiceConfig>,
    pub request_timeout: Duration,
    pub seed_sample_notes: bool,
    pub allowed_origins: String,
    pub log: LogConfig,
}

fn parse_bool(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT '{}'", v)))?,
            None => defaults::SERVER_PORT,
        };

        let store = get("NOTE_STORE")
            .as_deref()
            .unwrap_or(defaults::NOTE_STORE)
            .parse::<StoreBackend>()?;

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| Error::Config(format!("invalid REQUEST_TIMEOUT_SECS '{}'", v)))?,
            None => defaults::REQUEST_TIMEOUT_SECS,
        };

        let data_service = match (get("DATA_SERVICE_URL"), get("DATA_SERVICE_API_KEY")) {
            (Some(url), Some(api_key)) => Some(DataServiceConfig { url, api_key }),
            _ => None,
        };
        if store == StoreBackend::Rest && data_service.is_none() {
            return Err(Error::Config(
                "NOTE_STORE=rest requires DATA_SERVICE_URL and DATA_SERVICE_API_KEY".to_string(),
            ));
        }

        let format = match get("LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>()?,
            None => LogFormat::Text,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| defaults::SERVER_HOST.to_string()),
            port,
            store,
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            data_service,
            request_timeout: Duration::from_secs(request_timeout_secs),
            seed_sample_notes: get("SEED_SAMPLE_NOTES")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            allowed_origins: get("ALLOWED_ORIGINS")
                .unwrap_or_else(|| defaults::ALLOWED_ORIGINS.to_string()),
            log: LogConfig {
                format,
                file: get("LOG_FILE"),
                ansi: get("LOG_ANSI").map(|v| parse_bool(&v)),
            },
        })
    }

    /// `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
