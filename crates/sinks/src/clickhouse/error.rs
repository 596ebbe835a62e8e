//! ClickHouse sink errors

/// Errors from the ClickHouse sink
#[derive(Debug, thiserror::Error)]
pub enum ClickHouseSinkError {
    /// ClickHouse client error
    #[error("clickhouse error: {0}")]
    ClickHouse(#[from] clickhouse::error::Error),

    /// Insert gave up after exhausting the retry budget
    #[error("insert error: {0}")]
    InsertError(String),

    /// Schema provisioning failed
    #[error("schema error: {0}")]
    SchemaError(String),
}
