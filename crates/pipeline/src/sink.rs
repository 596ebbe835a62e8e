//! Sink seam between the pipeline and storage

use std::future::Future;

use flowch_protocol::ClassifiedRecord;

/// Destination for flushed batches.
///
/// The sink loop calls `write_batch` once per full batch and once for a
/// non-empty final partial batch; batches arrive in input order and each
/// record appears in exactly one batch. An error is fatal to the run - any
/// retry policy belongs inside the implementation, behind this contract.
pub trait RecordSink: Send {
    /// Error type surfaced on write failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one batch atomically: all rows or none.
    fn write_batch(
        &mut self,
        batch: Vec<ClassifiedRecord>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
