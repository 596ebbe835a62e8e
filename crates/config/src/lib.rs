//! Configuration for the flowch collector
//!
//! A single TOML file with one section per concern:
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [pipeline]
//! queue_size = 100
//! batch_size = 100000
//!
//! [clickhouse]
//! url = "http://localhost:8123"
//! database = "traffic"
//!
//! [users]
//! url = "http://portal.internal/users.json"
//!
//! [networks]
//! file = "/etc/flowch/networks.csv"
//! [networks.static]
//! "192.168.0.0/16" = "local"
//! ```
//!
//! Every section is optional and falls back to its defaults. Validation is a
//! distinct step so a parsed config can be inspected before it is rejected.

pub mod clickhouse;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod pipeline;

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use clickhouse::ClickHouseConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use lookup::LookupTableConfig;
pub use pipeline::PipelineConfig;

/// Root configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub pipeline: PipelineConfig,
    pub clickhouse: ClickHouseConfig,
    pub users: LookupTableConfig,
    pub networks: LookupTableConfig,
}

impl Config {
    /// Reads and parses a config file. Does not validate.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        raw.parse()
    }

    /// Checks cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.clickhouse.validate()?;
        self.users.validate("users")?;
        self.networks.validate("networks")?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_valid() {
        let cfg: Config = "".parse().unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.log.level, LogLevel::Info);
        assert_eq!(cfg.pipeline.queue_size, pipeline::DEFAULT_QUEUE_SIZE);
        assert_eq!(cfg.clickhouse.database, "default");
    }

    #[test]
    fn full_document_parses() {
        let cfg: Config = r#"
            [log]
            level = "debug"

            [pipeline]
            queue_size = 16
            batch_size = 5000
            collected = "2024-05-01T00:00:00Z"

            [clickhouse]
            url = "http://ch.internal:8123"
            database = "traffic"
            username = "writer"
            password = "secret"
            retry_attempts = 5

            [users]
            url = "http://portal.internal/users.json"

            [networks]
            file = "/etc/flowch/networks.csv"
            delimiter = ","
            [networks.static]
            "192.168.0.0/16" = "local"
        "#
        .parse()
        .unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.log.level, LogLevel::Debug);
        assert_eq!(cfg.pipeline.queue_size, 16);
        assert!(cfg.pipeline.collected_at().unwrap().is_some());
        assert_eq!(cfg.clickhouse.retry_attempts, 5);
        assert!(cfg.users.has_fetch());
        assert_eq!(cfg.networks.delimiter_char("networks").unwrap(), ',');
        assert_eq!(
            cfg.networks.entries.get("192.168.0.0/16").map(String::as_str),
            Some("local")
        );
    }

    #[test]
    fn unknown_section_is_tolerated() {
        // Forward compatibility: extra sections parse, unknown keys inside
        // known sections do too.
        let cfg: Config = "[future]\nknob = 1".parse().unwrap();
        cfg.validate().unwrap();
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = "not = [valid".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_bad_sections() {
        let cfg: Config = "[pipeline]\nqueue_size = 0".parse().unwrap();
        assert!(cfg.validate().is_err());

        let cfg: Config = "[users]\ndelimiter = \"\"".parse().unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file("/nonexistent/flowch.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
