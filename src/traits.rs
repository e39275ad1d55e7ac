//! Capability traits implemented by the queues.
//!
//! Each trait covers one narrow concern so that callers, such as the blocking
//! combinators, can ask for exactly the capabilities they use. All methods
//! take `&self`: queues are shared between threads (usually behind an `Arc`)
//! and synchronize internally.
//!
//! | Trait              | `FiniteQueue` | `InfiniteQueue` |
//! |--------------------|:-------------:|:---------------:|
//! | [`Owner`]          | yes           | yes             |
//! | [`GarbageCollector`] | yes         | yes             |
//! | [`Enqueuer`]       | yes           | yes             |
//! | [`EnqueueInFronter`] | yes         | yes             |
//! | [`Dequeuer`]       | yes           | yes             |
//! | [`Peeker`]         | yes           | yes             |
//! | [`Info`]           | yes           | yes             |
//! | [`Event`]          | yes           | yes             |
//! | [`Resizer`]        | yes           | no              |
//! | [`EnqueueLossy`]   | yes           | no              |

use crate::signal::SignalReceiver;

/// Ends the life of a queue.
pub trait Owner<T> {
    /// Drain the remaining items and release the queue's storage and signals.
    ///
    /// Receivers obtained through [`Event`] observe disconnection. Any call on
    /// the queue after `close` is a precondition violation: the queue does not
    /// guard against it and results are unspecified (though memory safe).
    fn close(&self) -> Vec<T>;
}

/// Rebuilds the backing storage so stale slots are released.
pub trait GarbageCollector {
    fn garbage_collect(&self);
}

/// Places items at the tail.
pub trait Enqueuer<T> {
    /// Append `item`.
    ///
    /// # Errors
    ///
    /// Overflow: the queue is full and `item` is handed back untouched.
    fn enqueue(&self, item: T) -> Result<(), T>;

    /// Append `items` in order until the queue is full.
    ///
    /// # Errors
    ///
    /// Overflow: returns the items that were not placed, starting with the
    /// first one that did not fit.
    fn enqueue_multiple(&self, items: Vec<T>) -> Result<(), Vec<T>>;
}

/// Places a single item at the head.
pub trait EnqueueInFronter<T> {
    /// Insert `item` so that it is the next one dequeued.
    ///
    /// # Errors
    ///
    /// Overflow: the queue is full and `item` is handed back untouched.
    fn enqueue_in_front(&self, item: T) -> Result<(), T>;
}

/// Destructively removes items from the head.
pub trait Dequeuer<T> {
    /// Remove the head item. `None` is underflow.
    fn dequeue(&self) -> Option<T>;

    /// Remove up to `n` items, oldest first. Empty on underflow.
    fn dequeue_multiple(&self, n: usize) -> Vec<T>;

    /// Remove every item, oldest first.
    fn flush(&self) -> Vec<T>;
}

/// Non-destructive reads.
pub trait Peeker<T> {
    /// Copies of every item, head first.
    fn peek(&self) -> Vec<T>;

    /// Copy of the head item. `None` is underflow.
    fn peek_head(&self) -> Option<T>;

    /// Copies of up to `n` items from the head.
    fn peek_from_head(&self, n: usize) -> Vec<T>;
}

/// Size reporting.
pub trait Info {
    /// Number of stored items.
    fn length(&self) -> usize;

    /// Size of the backing storage. Fixed for finite queues; for infinite
    /// queues this is the current allocation and changes over time.
    fn capacity(&self) -> usize;
}

/// Access to the queue's presence signals.
///
/// Receivers become stale when the queue replaces its signals (resize) or
/// releases them (close); re-fetch after either.
pub trait Event {
    /// Fires after items were enqueued.
    fn signal_arrived(&self) -> SignalReceiver;

    /// Fires after items were dequeued.
    fn signal_removed(&self) -> SignalReceiver;
}

/// Changes the capacity of a fixed-size queue.
pub trait Resizer<T> {
    /// Set the capacity to `new_size` (0 is clamped to 1), returning the
    /// oldest items that no longer fit. Replaces both signals.
    fn resize(&self, new_size: usize) -> Vec<T>;
}

/// Enqueue that evicts the head instead of overflowing.
pub trait EnqueueLossy<T> {
    /// Append `item`, first evicting the head if the queue is full.
    /// Returns the evicted item, if any.
    fn enqueue_lossy(&self, item: T) -> Option<T>;
}
