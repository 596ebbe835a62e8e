//! Bounded record queue
//!
//! A thin wrapper over `tokio::sync::mpsc` giving the pipeline an explicit
//! open/closed vocabulary: the sender side is closed by consuming it, and
//! the receiver observes close only after every buffered item has been
//! drained. This keeps the Running/Draining/Closed state machine visible in
//! the API rather than implicit in channel drop order.

use tokio::sync::mpsc;

/// Returned by [`QueueSender::send`] when the receiver is gone; carries the
/// rejected item back to the caller.
#[derive(Debug)]
pub struct QueueClosed<T>(pub T);

/// Create a bounded queue with the given capacity.
pub fn bounded<T>(capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (QueueSender { tx }, QueueReceiver { rx })
}

/// Producing half of the queue.
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> QueueSender<T> {
    /// Enqueue one item, suspending while the queue is full.
    ///
    /// This suspension is the pipeline's sole backpressure mechanism.
    pub async fn send(&self, item: T) -> Result<(), QueueClosed<T>> {
        self.tx.send(item).await.map_err(|e| QueueClosed(e.0))
    }

    /// Close the queue. No more items will arrive; buffered items stay
    /// available to the receiver.
    pub fn close(self) {}
}

/// Consuming half of the queue.
#[derive(Debug)]
pub struct QueueReceiver<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Dequeue the next item, suspending while the queue is open and empty.
    ///
    /// Returns `None` only once the queue is closed *and* fully drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Collect every remaining item until the queue reports closed.
    pub async fn drain(mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.rx.recv().await {
            items.push(item);
        }
        items
    }
}
