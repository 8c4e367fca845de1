//! PostgreSQL pool for the notes table.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use notekeep_core::{defaults, Error, Result};

/// Sizing and wait bound for the notes pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// Waiting longer than this for a connection fails the call.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: defaults::DB_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Use the same bound as data service calls.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Open the pool and wait for the first connection, so an unreachable
/// database fails at startup instead of on the first request.
pub async fn connect_pool(database_url: &str, config: &PoolConfig) -> Result<PgPool> {
    if database_url.trim().is_empty() {
        return Err(Error::Config("DATABASE_URL is empty".to_string()));
    }

    let start = Instant::now();
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await?;

    info!(
        subsystem = "db",
        component = "pool",
        max_connections = config.max_connections,
        acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
        duration_ms = start.elapsed().as_millis() as u64,
        "Notes database connected"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wait_matches_request_timeout() {
        let config = PoolConfig::default();
        assert_eq!(
            config.acquire_timeout,
            Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(config.max_connections, defaults::DB_MAX_CONNECTIONS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PoolConfig::new()
            .with_max_connections(2)
            .with_acquire_timeout(Duration::from_millis(250));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_blank_url_rejected_before_connecting() {
        let err = connect_pool("  ", &PoolConfig::default()).await.unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("DATABASE_URL")));
    }
}
