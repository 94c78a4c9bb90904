//! Ambient observability counters for a [`crate::Ring`].
//!
//! These are advisory instrumentation, not part of the channel's correctness
//! protocol: all updates use `Relaxed` ordering and are performed after the
//! mutex-protected state transition they describe has already completed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe, always-on counters tracked by a [`crate::Ring`].
#[derive(Debug, Default)]
pub struct Metrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    sends_blocked: AtomicU64,
    recvs_blocked: AtomicU64,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_send(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_recv(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_send_blocked(&self) {
        self.sends_blocked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_recv_blocked(&self) {
        self.recvs_blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            sends_blocked: self.sends_blocked.load(Ordering::Relaxed),
            recvs_blocked: self.recvs_blocked.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time, plain-data copy of a channel's [`Metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total values successfully published by producers.
    pub messages_sent: u64,
    /// Total values successfully taken by the consumer.
    pub messages_received: u64,
    /// Number of `send` calls that had to wait for a free slot.
    pub sends_blocked: u64,
    /// Number of `recv` calls that had to wait for a ready slot.
    pub recvs_blocked: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let metrics = Metrics::new();
        metrics.record_send();
        metrics.record_send();
        metrics.record_recv();
        metrics.record_send_blocked();

        let snap = metrics.snapshot();
        assert_eq!(snap.messages_sent, 2);
        assert_eq!(snap.messages_received, 1);
        assert_eq!(snap.sends_blocked, 1);
        assert_eq!(snap.recvs_blocked, 0);
    }
}
