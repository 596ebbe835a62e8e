//! Fixed-capacity record batcher

use flowch_protocol::ClassifiedRecord;

/// Accumulates classified records into fixed-size batches.
///
/// Purely synchronous so the flush arithmetic is testable without any
/// concurrency: `push` hands back a full batch exactly when the buffer
/// reaches capacity, `finish` hands back a non-empty remainder once. For N
/// records and capacity B that is `ceil(N / B)` flushes covering every
/// record exactly once, in order.
#[derive(Debug)]
pub struct Batcher {
    capacity: usize,
    buf: Vec<ClassifiedRecord>,
}

impl Batcher {
    /// Create a batcher flushing every `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Configured batch capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records currently buffered.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a record; returns the full batch once capacity is reached,
    /// leaving the buffer empty for the next one.
    pub fn push(&mut self, record: ClassifiedRecord) -> Option<Vec<ClassifiedRecord>> {
        self.buf.push(record);

        if self.buf.len() >= self.capacity {
            let full = std::mem::replace(&mut self.buf, Vec::with_capacity(self.capacity));
            Some(full)
        } else {
            None
        }
    }

    /// Take the final partial batch at end of stream, if any.
    ///
    /// An empty buffer yields `None` so a stream ending exactly on a batch
    /// boundary produces no zero-row flush.
    pub fn finish(self) -> Option<Vec<ClassifiedRecord>> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.buf)
        }
    }
}
