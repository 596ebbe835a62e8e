//! ClickHouse sink implementation

use std::future::Future;

use clickhouse::Client;
use tracing::{debug, info, warn};

use flowch_pipeline::RecordSink;
use flowch_protocol::ClassifiedRecord;

use super::config::ClickHouseConfig;
use super::error::ClickHouseSinkError;
use super::rows::FlowRow;
use super::schema::{ALL_DDL, DETAILS_TABLE};

/// Sink writing classified flow records to ClickHouse.
pub struct ClickHouseSink {
    client: Client,
    config: ClickHouseConfig,
}

impl ClickHouseSink {
    /// Create a sink from its configuration.
    pub fn new(config: ClickHouseConfig) -> Self {
        let client = config.build_client();
        Self { client, config }
    }

    /// Reference to the configuration.
    pub fn config(&self) -> &ClickHouseConfig {
        &self.config
    }

    /// Check the connection before starting the pipeline, so connection
    /// problems surface as a startup failure rather than mid-run.
    pub async fn ping(&self) -> Result<(), ClickHouseSinkError> {
        self.client.query("SELECT 1").execute().await?;
        Ok(())
    }

    /// Idempotently create the detail table and the rollup views.
    pub async fn ensure_schema(&self) -> Result<(), ClickHouseSinkError> {
        info!(
            url = %self.config.url,
            database = %self.config.database,
            "provisioning clickhouse schema"
        );

        for (name, ddl) in ALL_DDL {
            self.execute_with_retry(ddl)
                .await
                .map_err(|e| ClickHouseSinkError::SchemaError(format!("{}: {}", name, e)))?;
            debug!(object = name, "schema statement applied");
        }

        Ok(())
    }

    /// Insert all rows as one INSERT statement with bounded retries.
    async fn insert_with_retry(&self, rows: &[FlowRow]) -> Result<(), ClickHouseSinkError> {
        let mut delay = self.config.retry_base_delay;

        for attempt in 0..=self.config.retry_attempts {
            if attempt > 0 {
                warn!(
                    attempt = attempt,
                    max_attempts = self.config.retry_attempts,
                    delay_ms = delay.as_millis(),
                    "retrying insert"
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, self.config.retry_max_delay);
            }

            match self.do_insert(rows).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.retry_attempts => {
                    warn!(error = %e, attempt = attempt, "insert failed, will retry");
                }
                Err(e) => return Err(e),
            }
        }

        Err(ClickHouseSinkError::InsertError(
            "max retries exceeded".into(),
        ))
    }

    /// One INSERT covering the whole batch: all rows commit or none do.
    async fn do_insert(&self, rows: &[FlowRow]) -> Result<(), ClickHouseSinkError> {
        let mut insert = self.client.insert(DETAILS_TABLE)?;

        for row in rows {
            insert.write(row).await?;
        }

        insert.end().await?;
        Ok(())
    }

    /// Execute one schema statement with bounded retries.
    async fn execute_with_retry(&self, sql: &str) -> Result<(), ClickHouseSinkError> {
        let mut delay = self.config.retry_base_delay;

        for attempt in 0..=self.config.retry_attempts {
            if attempt > 0 {
                warn!(
                    attempt = attempt,
                    max_attempts = self.config.retry_attempts,
                    delay_ms = delay.as_millis(),
                    "retrying schema statement"
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, self.config.retry_max_delay);
            }

            match self.client.query(sql).execute().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.retry_attempts => {
                    warn!(error = %e, attempt = attempt, "schema statement failed, will retry");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClickHouseSinkError::InsertError(
            "max retries exceeded".into(),
        ))
    }
}

impl RecordSink for ClickHouseSink {
    type Error = ClickHouseSinkError;

    fn write_batch(
        &mut self,
        batch: Vec<ClassifiedRecord>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move {
            let rows: Vec<FlowRow> = batch.iter().map(FlowRow::from).collect();

            self.insert_with_retry(&rows).await?;

            info!(table = DETAILS_TABLE, rows = rows.len(), "batch written");
            Ok(())
        }
    }
}
