//! A bounded multi-producer, single-consumer ring-buffer channel.
//!
//! Producers enqueue values of a generic element type `T`; a single
//! consumer dequeues them in FIFO order. The channel is strictly in-memory
//! and intra-process: it coordinates hand-off of owned values between
//! concurrent threads with a fixed-capacity ring buffer, a mutex, and two
//! condition variables.
//!
//! # Example
//!
//! ```
//! use ringmpsc::channel;
//! use std::thread;
//!
//! let (producer, mut consumer) = channel::<u64>(16);
//!
//! let producer2 = producer.clone();
//! let handle = thread::spawn(move || {
//!     for i in 0..1_000 {
//!         producer2.send(i).unwrap();
//!     }
//! });
//!
//! let sender = thread::spawn(move || {
//!     for i in 0..1_000 {
//!         producer.send(i).unwrap();
//!     }
//! });
//!
//! let mut received = 0;
//! while consumer.recv().is_some() {
//!     received += 1;
//! }
//! sender.join().unwrap();
//! handle.join().unwrap();
//! assert_eq!(received, 2_000);
//! ```
//!
//! # Ordering guarantees
//!
//! Messages from a single producer are received in the order that producer
//! sent them. Messages across producers are totally ordered by slot
//! reservation order (the order in which producers acquired the ring's
//! internal lock); the channel does not otherwise promise a particular
//! interleaving between producers.
//!
//! # Disconnection
//!
//! Dropping the last `Producer` causes the `Consumer`'s `recv`/`try_recv` to
//! observe end-of-stream once the ring is drained. Dropping the `Consumer`
//! causes every `Producer`'s `send` to fail with [`SendError`], returning
//! the undelivered value.

mod channel;
mod error;
mod invariants;
mod metrics;
mod ring;

pub use channel::{channel, Consumer, Producer};
pub use error::{SendError, TryRecvError};
pub use metrics::{Metrics, MetricsSnapshot};
