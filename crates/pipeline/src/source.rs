//! Source task: read, parse, enqueue

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use flowch_protocol::{FlowRecord, LineParser};

use crate::metrics::PipelineMetrics;
use crate::queue::QueueSender;

/// Read lines until EOF or cancellation, parsing each and enqueueing the
/// accepted records.
///
/// Rejected lines are counted and skipped at trace level - malformed input
/// is expected (headers, truncated tail lines) and never fails the task.
/// The queue is closed on every exit path, which is what moves the sink
/// side into draining.
pub async fn read_lines<R>(
    reader: R,
    parser: LineParser,
    queue: QueueSender<FlowRecord>,
    metrics: Arc<PipelineMetrics>,
    shutdown: CancellationToken,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    info!("source task started");

    let mut lines: Lines<R> = reader.lines();

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                debug!("source task cancelled");
                break;
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // EOF
                };

                match parser.parse(&line) {
                    Some(record) => {
                        metrics.record_parsed();
                        if queue.send(record).await.is_err() {
                            debug!("record queue closed, stopping source task");
                            break;
                        }
                    }
                    None => {
                        metrics.record_skipped();
                        trace!(line = %line, "skipping non-data line");
                    }
                }
            }
        }
    }

    queue.close();

    let snapshot = metrics.snapshot();
    info!(
        lines = snapshot.lines_read,
        parsed = snapshot.records_parsed,
        skipped = snapshot.lines_skipped,
        "source task finished"
    );

    Ok(())
}
