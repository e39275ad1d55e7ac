//! Capacity-growing FIFO queue.
//!
//! When the backing storage is exhausted it is reallocated with
//! `grow_increment` extra slots, so enqueues never overflow. Signals are
//! unbuffered: a notification only reaches a receiver that is waiting while
//! the signal timeout runs, which makes them strictly advisory here.
//!
//! # Examples
//!
//! ```rust
//! use fifoq::InfiniteQueue;
//! use fifoq::prelude::*;
//!
//! let queue = InfiniteQueue::new(2);
//! for item in 0..3 {
//!     assert!(queue.enqueue(item).is_ok());
//! }
//! assert_eq!(queue.capacity(), 4);
//!
//! queue.dequeue_multiple(2);
//! queue.garbage_collect();
//! assert_eq!(queue.capacity(), 2);
//! ```

use parking_lot::RwLock;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::InfiniteConfig;
use crate::constants::MIN_GROW_INCREMENT;
use crate::ring::Ring;
use crate::signal::{self, SignalReceiver, Signals};
use crate::traits::{
    Dequeuer, EnqueueInFronter, Enqueuer, Event, GarbageCollector, Info, Owner, Peeker,
};

/// Lock-protected state.
#[derive(Debug)]
struct State<T> {
    items: Ring<T>,
    /// Zero once the queue has been closed.
    grow_increment: usize,
    /// `None` once the queue has been closed.
    signals: Option<Signals>,
}

impl<T> State<T> {
    fn new(grow_increment: usize) -> Self {
        Self {
            items: Ring::with_capacity(grow_increment),
            grow_increment,
            signals: Some(Signals::with_depth(0)),
        }
    }

    fn grow_if_full(&mut self) {
        if self.items.is_full() {
            self.items.grow(self.grow_increment);
            trace!(capacity = self.items.capacity(), "Infinite queue grew");
        }
    }

    /// Smallest multiple of the grow increment that holds every item, and at
    /// least one increment.
    fn compact_capacity(&self) -> usize {
        let step = self.grow_increment.max(MIN_GROW_INCREMENT);
        self.items.len().div_ceil(step).max(1) * step
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

/// Thread-safe queue whose storage grows in fixed increments.
///
/// Locking follows [`FiniteQueue`](crate::FiniteQueue): shared for reads,
/// exclusive for every mutation. Signals are sent while the lock is held, so
/// a non-zero signal timeout lengthens each mutation by up to that timeout
/// when nobody is listening.
#[derive(Debug)]
pub struct InfiniteQueue<T> {
    state: RwLock<State<T>>,
    signal_timeout: Duration,
}

impl<T> InfiniteQueue<T> {
    /// Create an empty queue that grows by `grow_increment` (0 is clamped to 1).
    #[must_use]
    pub fn new(grow_increment: usize) -> Self {
        Self::with_config(&InfiniteConfig::with_grow_increment(grow_increment))
    }

    /// Create an empty queue from configuration.
    #[must_use]
    pub fn with_config(config: &InfiniteConfig) -> Self {
        let grow_increment = config.grow_increment.max(MIN_GROW_INCREMENT);
        Self {
            state: RwLock::new(State::new(grow_increment)),
            signal_timeout: config.signal_timeout,
        }
    }

    /// Capacity added each time the storage is exhausted; zero after `close`.
    pub fn grow_increment(&self) -> usize {
        self.state.read().grow_increment
    }
}

impl<T> Owner<T> for InfiniteQueue<T> {
    fn close(&self) -> Vec<T> {
        let mut state = self.state.write();
        let items = state.items.release();
        state.signals = None;
        state.grow_increment = 0;
        debug!(drained = items.len(), "Infinite queue closed");
        items
    }
}

impl<T> GarbageCollector for InfiniteQueue<T> {
    fn garbage_collect(&self) {
        let mut state = self.state.write();
        let old_capacity = state.items.capacity();
        let new_capacity = state.compact_capacity();
        state.items.reallocate(new_capacity);
        debug!(
            old_capacity,
            new_capacity,
            length = state.items.len(),
            "Infinite queue storage rebuilt"
        );
    }
}

impl<T> Enqueuer<T> for InfiniteQueue<T> {
    /// Never overflows on an open queue.
    fn enqueue(&self, item: T) -> Result<(), T> {
        let mut state = self.state.write();
        state.grow_if_full();
        state.items.push_back(item)?;
        state.fire_arrived(self.signal_timeout);
        Ok(())
    }

    fn enqueue_multiple(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        let mut state = self.state.write();
        let mut items = items.into_iter();
        while let Some(item) = items.next() {
            state.grow_if_full();
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

impl<T> EnqueueInFronter<T> for InfiniteQueue<T> {
    fn enqueue_in_front(&self, item: T) -> Result<(), T> {
        let mut state = self.state.write();
        state.grow_if_full();
        state.items.push_front(item)?;
        state.fire_arrived(self.signal_timeout);
        Ok(())
    }
}

impl<T> Dequeuer<T> for InfiniteQueue<T> {
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
        let length = state.items.len();
        let items = state.items.pop_front_n(length);
        if !items.is_empty() {
            state.fire_removed(self.signal_timeout);
        }
        items
    }
}

impl<T: Clone> Peeker<T> for InfiniteQueue<T> {
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

impl<T> Info for InfiniteQueue<T> {
    fn length(&self) -> usize {
        self.state.read().items.len()
    }

    /// Current allocation; grows on demand and shrinks on garbage collection.
    fn capacity(&self) -> usize {
        self.state.read().items.capacity()
    }
}

impl<T> Event for InfiniteQueue<T> {
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
