//! Loom-based exploration of the mutex/condvar reservation protocol.
//!
//! Run with: `cargo test --features loom --test loom_tests --release`
//!
//! Loom exhaustively explores thread interleavings to find concurrency bugs
//! that might only occur under specific scheduling. We model a small,
//! self-contained version of `Ring`'s push/pop protocol here rather than
//! pulling in the real `Ring`, since loom requires its own mock
//! `Mutex`/`Condvar`/atomics and cannot run against `std`'s.

#![cfg(feature = "loom")]

use loom::sync::{Condvar, Mutex};
use loom::thread;
use std::collections::VecDeque;

/// Mirrors `ring::State` and `Ring`'s two condition variables, trimmed to a
/// `VecDeque` instead of a fixed slot array since loom's state space only
/// cares about the synchronization protocol, not the storage layout.
struct LoomRing {
    state: Mutex<State>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

struct State {
    queue: VecDeque<u64>,
    producer_count: usize,
    consumer_alive: bool,
}

impl LoomRing {
    fn new(capacity: usize, producer_count: usize) -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                producer_count,
                consumer_alive: true,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    fn try_send(&self, value: u64) -> Result<(), u64> {
        let mut guard = self.state.lock().unwrap();
        if !guard.consumer_alive {
            return Err(value);
        }
        if guard.queue.len() == self.capacity {
            return Err(value);
        }
        guard.queue.push_back(value);
        drop(guard);
        self.not_empty.notify_one();
        Ok(())
    }

    fn try_recv(&self) -> Option<u64> {
        let mut guard = self.state.lock().unwrap();
        let value = guard.queue.pop_front();
        if value.is_some() {
            drop(guard);
            self.not_full.notify_one();
        }
        value
    }

    fn deregister_producer(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.producer_count -= 1;
        let last = guard.producer_count == 0;
        drop(guard);
        if last {
            self.not_empty.notify_all();
        }
    }

    fn deregister_consumer(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.consumer_alive = false;
        drop(guard);
        self.not_full.notify_all();
    }
}

/// Single producer, single consumer: every sent value is received in order,
/// and nothing is received that was not sent.
#[test]
fn loom_single_producer_single_consumer() {
    loom::model(|| {
        let ring = loom::sync::Arc::new(LoomRing::new(2, 1));
        let ring2 = ring.clone();

        let producer = thread::spawn(move || {
            ring2.try_send(1).ok();
            ring2.try_send(2).ok();
            ring2.deregister_producer();
        });

        let mut received = Vec::new();
        for _ in 0..4 {
            if let Some(v) = ring.try_recv() {
                received.push(v);
            }
            thread::yield_now();
        }

        producer.join().unwrap();
        for pair in received.windows(2) {
            assert!(pair[0] < pair[1], "FIFO violated: {received:?}");
        }
    });
}

/// Two producers racing to fill a capacity-1 ring: at most one of the two
/// sends can succeed before a receive frees the slot.
#[test]
fn loom_two_producers_capacity_one() {
    loom::model(|| {
        let ring = loom::sync::Arc::new(LoomRing::new(1, 2));
        let ring_a = ring.clone();
        let ring_b = ring.clone();

        let a = thread::spawn(move || ring_a.try_send(1).is_ok());
        let b = thread::spawn(move || ring_b.try_send(2).is_ok());

        let a_ok = a.join().unwrap();
        let b_ok = b.join().unwrap();

        let guard = ring.state.lock().unwrap();
        assert!(guard.queue.len() <= 1);
        drop(guard);

        // At most one send could have landed before the other observed the
        // ring full (loom doesn't schedule a receiver here).
        assert!(!(a_ok && b_ok));
    });
}

/// Deregistering the last producer wakes a consumer blocked waiting for
/// more input, rather than leaving it parked forever.
#[test]
fn loom_last_producer_drop_unblocks_consumer() {
    loom::model(|| {
        let ring = loom::sync::Arc::new(LoomRing::new(1, 1));
        let ring2 = ring.clone();

        let producer = thread::spawn(move || {
            ring2.deregister_producer();
        });

        let mut guard = ring.state.lock().unwrap();
        while guard.queue.is_empty() && guard.producer_count > 0 {
            guard = ring.not_empty.wait(guard).unwrap();
        }
        let disconnected = guard.queue.is_empty() && guard.producer_count == 0;
        drop(guard);

        producer.join().unwrap();
        assert!(disconnected);
    });
}

/// Deregistering the consumer wakes a producer blocked on a full ring
/// rather than leaving it parked forever.
#[test]
fn loom_consumer_drop_unblocks_producer() {
    loom::model(|| {
        let ring = loom::sync::Arc::new(LoomRing::new(1, 1));
        ring.try_send(1).unwrap();

        let ring2 = ring.clone();
        let consumer = thread::spawn(move || {
            ring2.deregister_consumer();
        });

        let mut guard = ring.state.lock().unwrap();
        loop {
            if !guard.consumer_alive {
                break;
            }
            if guard.queue.len() < ring.capacity {
                break;
            }
            guard = ring.not_full.wait(guard).unwrap();
        }
        drop(guard);

        consumer.join().unwrap();
    });
}
