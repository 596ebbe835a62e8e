//! flowch - Sinks
//!
//! Storage sinks for classified flow records. ClickHouse is the only
//! destination: one detail row per flow plus three pre-aggregated rollup
//! views maintained by the database itself.
//!
//! ```text
//! [Pipeline] --Vec<ClassifiedRecord>--> [ClickHouseSink] --> details
//!                                                             ├─> daily
//!                                                             ├─> hourly
//!                                                             └─> minutely
//! ```

pub mod clickhouse;

pub use clickhouse::{
    ClickHouseConfig, ClickHouseSink, ClickHouseSinkError, ClassEnum, DirEnum, FlowRow,
};
