//! flowch - Pipeline
//!
//! The streaming stage that connects the line parser to the storage sink.
//!
//! # Architecture
//!
//! ```text
//! [lines] --parse--> bounded queue --classify--> [batcher] --full batch--> [RecordSink]
//!   source task                        sink task
//! ```
//!
//! Two tasks per run: a source task reads and parses lines, pushing accepted
//! records onto a bounded queue; the sink task dequeues, classifies, and
//! accumulates fixed-capacity batches, flushing each synchronously to the
//! sink. The queue is the only flow control - a full queue suspends the
//! source until the sink catches up.
//!
//! # State machine
//!
//! A run moves `Running -> Draining -> Closed`: Draining begins when the
//! source closes the queue, Closed once the queue is empty and the final
//! non-empty partial batch (if any) has been flushed exactly once. Records
//! reach the sink in input order, each exactly once.
//!
//! # Failure policy
//!
//! Malformed input lines are skipped by the parser and counted. Everything
//! else - input I/O errors, sink write errors - aborts the run; there are no
//! retry loops at this layer.

mod batch;
mod error;
mod metrics;
mod queue;
mod run;
mod sink;
mod source;

pub use batch::Batcher;
pub use error::{PipelineError, Result};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use queue::{bounded, QueueClosed, QueueReceiver, QueueSender};
pub use run::{run, PipelineConfig};
pub use sink::RecordSink;
pub use source::read_lines;

/// Default bounded queue capacity between source and sink tasks.
pub const DEFAULT_QUEUE_SIZE: usize = 100;

/// Default batch capacity before a flush.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;
