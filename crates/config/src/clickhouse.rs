use serde::Deserialize;

use crate::error::{ConfigError, Result};

pub const DEFAULT_CLICKHOUSE_URL: &str = "http://localhost:8123";
pub const DEFAULT_DATABASE: &str = "default";
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 100;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 10_000;

/// `[clickhouse]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClickHouseConfig {
    /// HTTP endpoint of the server.
    pub url: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Attempts per insert or DDL statement before giving up.
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CLICKHOUSE_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        }
    }
}

impl ClickHouseConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(ConfigError::invalid("clickhouse.url", "must not be empty"));
        }
        if self.database.is_empty() {
            return Err(ConfigError::invalid(
                "clickhouse.database",
                "must not be empty",
            ));
        }
        if self.retry_attempts == 0 {
            return Err(ConfigError::invalid(
                "clickhouse.retry_attempts",
                "must be >= 1",
            ));
        }
        Ok(())
    }
}
