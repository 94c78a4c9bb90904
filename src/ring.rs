use crate::invariants::{
    debug_assert_bounded_count, debug_assert_head_not_past_tail, debug_assert_initialized_read,
    debug_assert_monotonic,
};
use crate::{Metrics, MetricsSnapshot, SendError, TryRecvError};
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::{Condvar, Mutex};

// =============================================================================
// SYNCHRONIZATION STRATEGY
// =============================================================================
//
// Unlike a lock-free SPSC ring, this Ring serves an arbitrary number of
// concurrent producers against a single consumer, so slot reservation among
// producers must itself be serialized. The simplest correct way to do that
// (per the design notes this crate follows) is a single mutex guarding the
// slot array together with `head`/`tail`/`producer_count`/`consumer_alive`,
// with two condition variables for the two wait predicates:
//
// - `not_full`:  signaled whenever a slot frees up or the consumer drops.
// - `not_empty`: signaled whenever a slot is published or the last producer
//                drops.
//
// Because reservation, store, and publish all happen while a producer holds
// the mutex, the RESERVED state from the slot state machine is never
// externally observable: every transition a producer makes appears atomic
// to the consumer and to other producers. `head`/`tail` alone are therefore
// enough to describe visible state; the slot array itself holds `READY`
// elements in `[head, tail)` and nothing meaningful outside that range.
//
// =============================================================================

/// The shared ring buffer backing a channel.
///
/// Owned jointly by every `Producer` and the `Consumer` via `Arc`.
pub(crate) struct Ring<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    metrics: Metrics,
}

struct State<T> {
    slots: Box<[MaybeUninit<T>]>,
    /// Index of the next slot the consumer will read from.
    head: usize,
    /// Index of the next slot a producer will reserve.
    tail: usize,
    producer_count: usize,
    consumer_alive: bool,
}

impl<T> Ring<T> {
    /// Creates a new ring with the given capacity and one registered producer.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "ring capacity must be at least 1");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, MaybeUninit::uninit);

        Self {
            capacity,
            state: Mutex::new(State {
                slots: slots.into_boxed_slice(),
                head: 0,
                tail: 0,
                producer_count: 1,
                consumer_alive: true,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            metrics: Metrics::new(),
        }
    }

    pub(crate) fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // -------------------------------------------------------------------
    // PRODUCER-SIDE
    // -------------------------------------------------------------------

    /// Blocking enqueue. See `SPEC_FULL.md` section 4.2.
    pub(crate) fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut guard = self.state.lock().unwrap();
        loop {
            if !guard.consumer_alive {
                return Err(SendError(value));
            }
            if guard.tail - guard.head < self.capacity {
                break;
            }
            self.metrics.record_send_blocked();
            guard = self.not_full.wait(guard).unwrap();
        }

        let tail = guard.tail;
        let new_tail = tail + 1;
        debug_assert_bounded_count!(new_tail - guard.head, self.capacity);
        debug_assert_monotonic!("tail", tail, new_tail);

        let idx = tail % self.capacity;
        // SAFETY: idx is outside [head, tail) from the consumer's point of
        // view (it's the slot tail itself), so it holds no live element and
        // is safe to overwrite. We hold the mutex, so no other producer or
        // the consumer can observe or touch this slot concurrently.
        unsafe {
            guard.slots[idx].as_mut_ptr().write(value);
        }
        guard.tail = new_tail;
        drop(guard);

        self.metrics.record_send();
        self.not_empty.notify_one();
        Ok(())
    }

    /// Registers an additional producer. Called by `Producer::clone`.
    pub(crate) fn register_producer(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.producer_count += 1;
    }

    /// Deregisters a producer. Called by `Producer::drop`.
    ///
    /// Wakes the consumer if this was the last producer so it can observe
    /// end-of-stream.
    pub(crate) fn deregister_producer(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.producer_count -= 1;
        let last = guard.producer_count == 0;
        drop(guard);
        if last {
            self.not_empty.notify_all();
        }
    }

    // -------------------------------------------------------------------
    // CONSUMER-SIDE
    // -------------------------------------------------------------------

    /// Blocking dequeue. See `SPEC_FULL.md` section 4.3.
    pub(crate) fn recv(&self) -> Option<T> {
        let mut guard = self.state.lock().unwrap();
        loop {
            if guard.head < guard.tail {
                break;
            }
            if guard.producer_count == 0 {
                return None;
            }
            self.metrics.record_recv_blocked();
            guard = self.not_empty.wait(guard).unwrap();
        }

        let value = self.take_ready(&mut guard);
        drop(guard);
        self.metrics.record_recv();
        self.not_full.notify_one();
        Some(value)
    }

    /// Non-blocking dequeue. See `SPEC_FULL.md` section 4.3.
    pub(crate) fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut guard = self.state.lock().unwrap();
        if guard.head == guard.tail {
            return Err(if guard.producer_count == 0 {
                TryRecvError::Disconnected
            } else {
                TryRecvError::Empty
            });
        }

        let value = self.take_ready(&mut guard);
        drop(guard);
        self.metrics.record_recv();
        self.not_full.notify_one();
        Ok(value)
    }

    /// Moves the value out of slot `head` and advances `head`.
    ///
    /// Caller must have already verified `head < tail` while holding the
    /// lock that guards `guard`.
    fn take_ready(&self, guard: &mut State<T>) -> T {
        let head = guard.head;
        let tail = guard.tail;
        debug_assert_head_not_past_tail!(head, tail);
        debug_assert_initialized_read!(head, head, tail);

        let idx = head % self.capacity;
        // SAFETY: slot `idx` is within [head, tail) and therefore READY: some
        // producer completed its store there under this same mutex before
        // advancing tail past it. We are the sole consumer and hold the
        // lock, so no one else can read or overwrite it concurrently.
        let value = unsafe { guard.slots[idx].as_ptr().read() };

        let new_head = head + 1;
        debug_assert_monotonic!("head", head, new_head);
        guard.head = new_head;
        value
    }

    /// Deregisters the consumer. Called by `Consumer::drop`.
    ///
    /// Wakes all blocked producers so they observe disconnection and release
    /// any value they're holding rather than hang forever.
    pub(crate) fn deregister_consumer(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.consumer_alive = false;
        drop(guard);
        self.not_full.notify_all();
    }
}

impl<T> Drop for Ring<T> {
    fn drop(&mut self) {
        // No concurrent access is possible here: by the time a Ring's Arc
        // refcount reaches zero, every Producer and the Consumer have
        // already dropped, so `get_mut` needs no locking.
        let state = self.state.get_mut().unwrap();
        for i in state.head..state.tail {
            let idx = i % self.capacity;
            // SAFETY: every index in [head, tail) holds an initialized,
            // not-yet-consumed element that was never moved out.
            unsafe {
                ptr::drop_in_place(state.slots[idx].as_mut_ptr());
            }
        }
    }
}

// Ring<T> is Send + Sync whenever T: Send, derived automatically from its
// fields (`Mutex<State<T>>` is Send+Sync when `State<T>: Send`, which in
// turn only needs `T: Send` since every slot is plain `MaybeUninit<T>`
// storage reached exclusively through the mutex). No unsafe impl needed.
