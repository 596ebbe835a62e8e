use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Default bound of the parsed-record queue.
pub const DEFAULT_QUEUE_SIZE: usize = 100;

/// Default number of records per insert batch.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Capacity of the channel between the reader and the batcher.
    pub queue_size: usize,
    /// Records accumulated before a batch is handed to the sink.
    pub batch_size: usize,
    /// Override for the collection timestamp stamped onto every record,
    /// RFC 3339. When absent the wall clock at startup is used.
    pub collected: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            collected: None,
        }
    }
}

impl PipelineConfig {
    /// Parses the `collected` override, if one is set.
    pub fn collected_at(&self) -> Result<Option<DateTime<Utc>>> {
        match &self.collected {
            None => Ok(None),
            Some(raw) => {
                let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                    ConfigError::invalid("pipeline.collected", format!("not RFC 3339: {e}"))
                })?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.queue_size == 0 {
            return Err(ConfigError::invalid("pipeline.queue_size", "must be >= 1"));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::invalid("pipeline.batch_size", "must be >= 1"));
        }
        self.collected_at()?;
        Ok(())
    }
}
