//! Pipeline metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the source task and the sink loop.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Input lines read (including rejected ones)
    pub lines_read: AtomicU64,

    /// Lines accepted by the parser
    pub records_parsed: AtomicU64,

    /// Lines rejected by the parser (header, malformed)
    pub lines_skipped: AtomicU64,

    /// Batches flushed to the sink
    pub batches_flushed: AtomicU64,

    /// Records flushed to the sink across all batches
    pub records_flushed: AtomicU64,
}

impl PipelineMetrics {
    /// Create a zeroed metrics instance.
    pub const fn new() -> Self {
        Self {
            lines_read: AtomicU64::new(0),
            records_parsed: AtomicU64::new(0),
            lines_skipped: AtomicU64::new(0),
            batches_flushed: AtomicU64::new(0),
            records_flushed: AtomicU64::new(0),
        }
    }

    /// Record an accepted line.
    #[inline]
    pub fn record_parsed(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
        self.records_parsed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected line.
    #[inline]
    pub fn record_skipped(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
        self.lines_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a flushed batch of `records` rows.
    #[inline]
    pub fn record_flush(&self, records: u64) {
        self.batches_flushed.fetch_add(1, Ordering::Relaxed);
        self.records_flushed.fetch_add(records, Ordering::Relaxed);
    }

    /// Current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            records_parsed: self.records_parsed.load(Ordering::Relaxed),
            lines_skipped: self.lines_skipped.load(Ordering::Relaxed),
            batches_flushed: self.batches_flushed.load(Ordering::Relaxed),
            records_flushed: self.records_flushed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`PipelineMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines_read: u64,
    pub records_parsed: u64,
    pub lines_skipped: u64,
    pub batches_flushed: u64,
    pub records_flushed: u64,
}
