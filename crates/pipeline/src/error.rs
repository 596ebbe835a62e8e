//! Pipeline errors

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the input stream failed
    #[error("input read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The sink rejected a batch; the run has no retry policy of its own
    #[error("sink write failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The source task panicked or was aborted
    #[error("source task failed: {0}")]
    SourceTask(String),
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;
