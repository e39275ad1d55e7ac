//! Thread-safe FIFO queues with presence signals and blocking combinators.
//!
//! - [`FiniteQueue`]: fixed capacity, reports overflow, supports lossy
//!   enqueue and resize. Signals are buffered to the capacity.
//! - [`InfiniteQueue`]: grows in fixed increments and never overflows.
//!   Signals are unbuffered and advisory.
//! - [`blocking`]: combinators that retry queue operations on a timer or on
//!   the queue's signals until they succeed or are cancelled.
//!
//! Queue operations never block. Outcomes are reported in the return type:
//! an overflowing enqueue returns `Err` with the rejected item(s), an
//! underflowing dequeue or peek returns `None` (or an empty `Vec`), and a
//! lossy enqueue returns the evicted item.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use fifoq::FiniteQueue;
//! use fifoq::prelude::*;
//!
//! let queue = Arc::new(FiniteQueue::new(16));
//! let arrived = queue.signal_arrived();
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         for item in 0..4 {
//!             assert!(queue.enqueue(item).is_ok());
//!         }
//!     })
//! };
//! producer.join().unwrap();
//!
//! assert!(arrived.try_recv().is_ok());
//! assert_eq!(queue.dequeue_multiple(4), vec![0, 1, 2, 3]);
//! ```

pub mod blocking;
pub mod config;
pub mod constants;
pub mod error;
pub mod finite;
pub mod infinite;
pub mod ring;
pub mod signal;
pub mod traits;

pub use config::{BlockingConfig, Config, FiniteConfig, InfiniteConfig, ValidationResult};
pub use error::{Error, Result};
pub use finite::FiniteQueue;
pub use infinite::InfiniteQueue;
pub use signal::{SignalReceiver, send_signal};

/// Capability traits, for glob import.
pub mod prelude {
    pub use crate::traits::{
        Dequeuer, EnqueueInFronter, EnqueueLossy, Enqueuer, Event, GarbageCollector, Info, Owner,
        Peeker, Resizer,
    };
}
