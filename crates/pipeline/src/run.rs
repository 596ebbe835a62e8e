//! Pipeline run loop

use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use flowch_classifier::Classifier;
use flowch_protocol::{ClassifiedRecord, LineParser};

use crate::batch::Batcher;
use crate::error::{PipelineError, Result};
use crate::metrics::{MetricsSnapshot, PipelineMetrics};
use crate::queue;
use crate::sink::RecordSink;
use crate::source::read_lines;
use crate::{DEFAULT_BATCH_SIZE, DEFAULT_QUEUE_SIZE};

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bounded queue capacity between source and sink tasks
    pub queue_size: usize,

    /// Records per batch before a flush
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Set the queue capacity.
    pub fn with_queue_size(mut self, size: usize) -> Self {
        self.queue_size = size;
        self
    }

    /// Set the batch capacity.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}

/// Lifecycle of one pipeline run. Internal bookkeeping for the run loop;
/// progress is observable through the debug logs and the final snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineState {
    /// Source is still producing records
    Running,

    /// Source closed the queue; buffered records are being consumed
    Draining,

    /// Queue empty, final batch flushed
    Closed,
}

/// Run the pipeline to completion.
///
/// Spawns the source task over `reader`, then classifies and batches on the
/// current task, flushing each full batch to `sink`. Completes when the
/// input is exhausted (or `shutdown` fires), the queue has drained, and the
/// final partial batch has been flushed.
///
/// # Errors
///
/// Input I/O failures and sink write failures abort the run; records already
/// flushed stay flushed, nothing after the failure is written.
pub async fn run<R, S>(
    reader: R,
    parser: LineParser,
    classifier: Classifier,
    sink: &mut S,
    config: PipelineConfig,
    shutdown: CancellationToken,
) -> Result<MetricsSnapshot>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    S: RecordSink,
{
    info!(
        queue_size = config.queue_size,
        batch_size = config.batch_size,
        "pipeline starting"
    );

    let metrics = Arc::new(PipelineMetrics::new());
    let (tx, mut rx) = queue::bounded(config.queue_size);

    let source = tokio::spawn(read_lines(
        reader,
        parser,
        tx,
        Arc::clone(&metrics),
        shutdown,
    ));

    let mut batcher = Batcher::new(config.batch_size);
    let mut state = PipelineState::Running;

    while let Some(record) = rx.recv().await {
        if state == PipelineState::Running && source.is_finished() {
            state = PipelineState::Draining;
            debug!("source finished, draining queue");
        }

        let classified = classifier.classify(&record);
        if let Some(batch) = batcher.push(classified) {
            flush(sink, batch, &metrics).await?;
        }
    }

    if state == PipelineState::Running {
        state = PipelineState::Draining;
    }
    debug!(?state, "queue drained");

    if let Some(batch) = batcher.finish() {
        flush(sink, batch, &metrics).await?;
    }

    state = PipelineState::Closed;
    debug!(?state, "pipeline run complete");

    match source.await {
        Ok(result) => result?,
        Err(e) => return Err(PipelineError::SourceTask(e.to_string())),
    }

    let snapshot = metrics.snapshot();
    info!(
        lines = snapshot.lines_read,
        parsed = snapshot.records_parsed,
        skipped = snapshot.lines_skipped,
        batches = snapshot.batches_flushed,
        records = snapshot.records_flushed,
        "pipeline closed"
    );

    Ok(snapshot)
}

async fn flush<S: RecordSink>(
    sink: &mut S,
    batch: Vec<ClassifiedRecord>,
    metrics: &PipelineMetrics,
) -> Result<()> {
    let count = batch.len() as u64;

    sink.write_batch(batch)
        .await
        .map_err(|e| PipelineError::Sink(Box::new(e)))?;

    metrics.record_flush(count);
    debug!(records = count, "batch flushed");

    Ok(())
}
