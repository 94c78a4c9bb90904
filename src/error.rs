use std::fmt;
use thiserror::Error;

/// Error returned by [`crate::Consumer::try_recv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    /// No ready element is available, but at least one producer is still alive.
    #[error("channel is empty")]
    Empty,
    /// The ring is drained and every producer has dropped.
    #[error("channel is disconnected")]
    Disconnected,
}

/// Error returned by [`crate::Producer::send`] when the consumer has dropped.
///
/// Carries the undelivered value back to the caller so it is never silently
/// dropped on the failing path.
#[derive(Error)]
#[error("sending on a disconnected channel")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Consumes the error, returning the undelivered value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Mirrors `std::sync::mpsc::SendError`: printed without requiring `T: Debug`.
impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "SendError(..)".fmt(f)
    }
}
