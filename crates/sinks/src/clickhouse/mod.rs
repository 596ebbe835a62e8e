//! ClickHouse Sink - flow accounting store
//!
//! Writes classified flow records into the `details` table and provisions
//! the schema: the detail table (MergeTree, partitioned by day) and the
//! `daily`/`hourly`/`minutely` AggregatingMergeTree materialized views that
//! keep running byte sums per user/class/direction bucket.
//!
//! # Write contract
//!
//! - `ensure_schema` is idempotent (`CREATE ... IF NOT EXISTS`), issued once
//!   at startup.
//! - `write_batch` inserts a whole batch as one INSERT: all rows commit or
//!   none do.
//! - Transient failures are retried a bounded number of times with
//!   exponential backoff; exhausting the retries is fatal to the run.

mod config;
mod error;
mod rows;
mod schema;
mod sink;

pub use config::{
    ClickHouseConfig, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY, DEFAULT_RETRY_MAX_DELAY,
};
pub use error::ClickHouseSinkError;
pub use rows::{ClassEnum, DirEnum, FlowRow};
pub use sink::ClickHouseSink;
