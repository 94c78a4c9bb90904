use crate::ring::Ring;
use crate::{MetricsSnapshot, SendError, TryRecvError};
use std::sync::Arc;

/// Creates a bounded MPSC channel with room for `capacity` elements.
///
/// Returns one [`Producer`] and one [`Consumer`] jointly bound to a fresh
/// ring buffer. Additional producers are obtained by cloning the returned
/// `Producer`; the `Consumer` is unique and cannot be cloned.
///
/// # Panics
///
/// Panics if `capacity` is zero.
///
/// # Example
///
/// ```
/// use ringmpsc::channel;
///
/// let (producer, mut consumer) = channel::<u64>(1);
/// producer.send(233).unwrap();
/// assert_eq!(consumer.recv(), Some(233));
/// drop(producer);
/// assert_eq!(consumer.recv(), None);
/// ```
pub fn channel<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    let ring = Arc::new(Ring::new(capacity));
    (
        Producer {
            ring: Arc::clone(&ring),
        },
        Consumer { ring },
    )
}

/// A cloneable handle for enqueuing values into a bounded MPSC channel.
///
/// Any number of `Producer`s may exist concurrently; each increments a
/// shared producer count on [`Clone::clone`] and decrements it on drop. Once
/// every `Producer` has dropped, the `Consumer` observes end-of-stream.
pub struct Producer<T> {
    ring: Arc<Ring<T>>,
}

impl<T> Producer<T> {
    /// Sends `value`, blocking while the ring is full and the consumer is
    /// still alive.
    ///
    /// Returns `Err(SendError(value))` if the consumer has dropped; the
    /// undelivered value is handed back rather than dropped silently.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        self.ring.send(value)
    }

    /// Returns a snapshot of the channel's ambient metrics.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.ring.metrics()
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        self.ring.register_producer();
        Self {
            ring: Arc::clone(&self.ring),
        }
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.ring.deregister_producer();
    }
}

/// The unique handle for dequeuing values from a bounded MPSC channel.
///
/// Exactly one `Consumer` exists per channel for its lifetime; it is not
/// `Clone`. Dropping it disconnects every `Producer`, causing their
/// in-flight and future `send` calls to fail.
pub struct Consumer<T> {
    ring: Arc<Ring<T>>,
}

impl<T> Consumer<T> {
    /// Receives the next value, blocking while the ring is empty and at
    /// least one producer is still alive.
    ///
    /// Returns `None` once the ring is drained and every producer has
    /// dropped. This condition is sticky: once observed, every subsequent
    /// call also returns `None`.
    pub fn recv(&mut self) -> Option<T> {
        self.ring.recv()
    }

    /// Receives the next value without blocking.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.ring.try_recv()
    }

    /// Returns a snapshot of the channel's ambient metrics.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.ring.metrics()
    }
}

impl<T> Drop for Consumer<T> {
    fn drop(&mut self) {
        self.ring.deregister_consumer();
    }
}
