//! Fixed-capacity FIFO queue.
//!
//! Enqueues fail with overflow once `capacity` items are stored, unless the
//! lossy variant is used, which evicts the oldest item instead. Signals are
//! buffered to the queue's capacity.
//!
//! # Examples
//!
//! ```rust
//! use fifoq::FiniteQueue;
//! use fifoq::prelude::*;
//!
//! let queue = FiniteQueue::new(2);
//! assert!(queue.enqueue("a").is_ok());
//! assert!(queue.enqueue("b").is_ok());
//!
//! // Full: the rejected item comes back to the caller.
//! assert_eq!(queue.enqueue("c"), Err("c"));
//!
//! // Lossy enqueue makes room by evicting the head.
//! assert_eq!(queue.enqueue_lossy("c"), Some("a"));
//! assert_eq!(queue.flush(), vec!["b", "c"]);
//! ```

use parking_lot::RwLock;
use std::time::Duration;
use tracing::debug;

use crate::config::FiniteConfig;
use crate::constants::MIN_CAPACITY;
use crate::ring::Ring;
use crate::signal::{self, SignalReceiver, Signals};
use crate::traits::{
    Dequeuer, EnqueueInFronter, EnqueueLossy, Enqueuer, Event, GarbageCollector, Info, Owner,
    Peeker, Resizer,
};

/// Lock-protected state.
#[derive(Debug)]
struct State<T> {
    items: Ring<T>,
    /// `None` once the queue has been closed.
    signals: Option<Signals>,
}

impl<T> State<T> {
    fn new(capacity: usize) -> Self {
        Self {
            items: Ring::with_capacity(capacity),
            signals: Some(Signals::with_depth(capacity)),
        }
    }

    fn fire_arrived(&self, timeout: Duration) {
        if let Some(signals) = &self.signals {
            signals.arrived.fire(timeout);
        }
    }

    fn fire_removed(&self, timeout: Duration) {
        if let Some(signals) = &self.signals {
            signals.removed.fire(timeout);
        }
    }
}

/// Thread-safe queue with a fixed upper bound.
///
/// Reads take the lock in shared mode; every mutation takes it exclusively,
/// so enqueue and dequeue on one instance never run at the same time.
#[derive(Debug)]
pub struct FiniteQueue<T> {
    state: RwLock<State<T>>,
    signal_timeout: Duration,
}

impl<T> FiniteQueue<T> {
    /// Create an empty queue holding up to `capacity` items (0 is clamped to 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(&FiniteConfig::with_capacity(capacity))
    }

    /// Create an empty queue from configuration.
    #[must_use]
    pub fn with_config(config: &FiniteConfig) -> Self {
        let capacity = config.capacity.max(MIN_CAPACITY);
        Self {
            state: RwLock::new(State::new(capacity)),
            signal_timeout: config.signal_timeout,
        }
    }
}

impl<T> Owner<T> for FiniteQueue<T> {
    fn close(&self) -> Vec<T> {
        let mut state = self.state.write();
        let items = state.items.release();
        state.signals = None;
        debug!(drained = items.len(), "Finite queue closed");
        items
    }
}

impl<T> GarbageCollector for FiniteQueue<T> {
    fn garbage_collect(&self) {
        let mut state = self.state.write();
        let capacity = state.items.capacity();
        state.items.reallocate(capacity);
        debug!(capacity, length = state.items.len(), "Finite queue storage rebuilt");
    }
}

impl<T> Enqueuer<T> for FiniteQueue<T> {
    fn enqueue(&self, item: T) -> Result<(), T> {
        let mut state = self.state.write();
        state.items.push_back(item)?;
        state.fire_arrived(self.signal_timeout);
        Ok(())
    }

    fn enqueue_multiple(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        let mut state = self.state.write();
        let mut items = items.into_iter();
        while let Some(item) = items.next() {
            if let Err(item) = state.items.push_back(item) {
                let mut remaining = Vec::with_capacity(items.len() + 1);
                remaining.push(item);
                remaining.extend(items);
                return Err(remaining);
            }
            state.fire_arrived(self.signal_timeout);
        }
        Ok(())
    }
}

impl<T> EnqueueInFronter<T> for FiniteQueue<T> {
    fn enqueue_in_front(&self, item: T) -> Result<(), T> {
        let mut state = self.state.write();
        state.items.push_front(item)?;
        state.fire_arrived(self.signal_timeout);
        Ok(())
    }
}

impl<T> EnqueueLossy<T> for FiniteQueue<T> {
    fn enqueue_lossy(&self, item: T) -> Option<T> {
        let mut state = self.state.write();
        let discarded = if state.items.is_full() {
            state.items.pop_front()
        } else {
            None
        };
        // Only a closed queue (zero capacity) can still be full here.
        if state.items.push_back(item).is_ok() {
            state.fire_arrived(self.signal_timeout);
        }
        discarded
    }
}

impl<T> Dequeuer<T> for FiniteQueue<T> {
    fn dequeue(&self) -> Option<T> {
        let mut state = self.state.write();
        let item = state.items.pop_front()?;
        state.fire_removed(self.signal_timeout);
        Some(item)
    }

    fn dequeue_multiple(&self, n: usize) -> Vec<T> {
        let mut state = self.state.write();
        let items = state.items.pop_front_n(n);
        if !items.is_empty() {
            state.fire_removed(self.signal_timeout);
        }
        items
    }

    fn flush(&self) -> Vec<T> {
        let mut state = self.state.write();
        let capacity = state.items.capacity();
        let items = state.items.pop_front_n(capacity);
        if !items.is_empty() {
            state.fire_removed(self.signal_timeout);
        }
        items
    }
}

impl<T: Clone> Peeker<T> for FiniteQueue<T> {
    fn peek(&self) -> Vec<T> {
        self.state.read().items.iter().cloned().collect()
    }

    fn peek_head(&self) -> Option<T> {
        self.state.read().items.front().cloned()
    }

    fn peek_from_head(&self, n: usize) -> Vec<T> {
        self.state.read().items.iter().take(n).cloned().collect()
    }
}

impl<T> Info for FiniteQueue<T> {
    fn length(&self) -> usize {
        self.state.read().items.len()
    }

    fn capacity(&self) -> usize {
        self.state.read().items.capacity()
    }
}

impl<T> Event for FiniteQueue<T> {
    fn signal_arrived(&self) -> SignalReceiver {
        self.state
            .read()
            .signals
            .as_ref()
            .map_or_else(signal::closed_receiver, |s| s.arrived.receiver())
    }

    fn signal_removed(&self) -> SignalReceiver {
        self.state
            .read()
            .signals
            .as_ref()
            .map_or_else(signal::closed_receiver, |s| s.removed.receiver())
    }
}

impl<T> Resizer<T> for FiniteQueue<T> {
    fn resize(&self, new_size: usize) -> Vec<T> {
        let mut state = self.state.write();
        let old_capacity = state.items.capacity();
        if new_size == old_capacity {
            return Vec::new();
        }
        let new_size = new_size.max(MIN_CAPACITY);
        let evicted = state.items.reallocate(new_size);
        // Dropping the old signals disconnects every receiver handed out so far.
        state.signals = Some(Signals::with_depth(new_size));
        debug!(
            old_capacity,
            new_capacity = new_size,
            evicted = evicted.len(),
            "Finite queue resized"
        );
        evicted
    }
}
