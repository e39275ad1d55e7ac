//! Blocking combinators over the queue capabilities.
//!
//! Queue operations never block; these functions do. Each one makes a first
//! attempt and, if that attempt overflowed, underflowed or came up short,
//! waits for a trigger and tries again until it succeeds or `done` fires.
//!
//! Two trigger flavours exist:
//!
//! - [`rate`]: a fixed-period ticker (`crossbeam::channel::tick`).
//! - [`event`]: the queue's own signals. Enqueue combinators wake when items
//!   are removed; dequeue, flush and peek combinators wake when items arrive.
//!
//! `done` cancels a wait either by delivering a message or by having its
//! sender dropped. After cancellation one final attempt is made and its
//! outcome is returned as is. Passing `None` waits until success (for the
//! flush combinators, forever).
//!
//! The "multiple" combinators are not atomic. Partial results from earlier
//! attempts are kept and only the remainder is retried, so other producers
//! or consumers on the same queue can interleave with them.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! use fifoq::FiniteQueue;
//! use fifoq::blocking;
//! use fifoq::prelude::*;
//!
//! let queue = Arc::new(FiniteQueue::new(1));
//! queue.enqueue(1).unwrap();
//!
//! let consumer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         thread::sleep(Duration::from_millis(20));
//!         queue.dequeue()
//!     })
//! };
//!
//! // Blocks until the consumer makes room.
//! assert!(blocking::must_enqueue(&*queue, 2, None, Duration::from_millis(5)).is_ok());
//! assert_eq!(consumer.join().unwrap(), Some(1));
//! assert_eq!(queue.peek(), vec![2]);
//! ```

pub mod event;
pub mod rate;

pub use event::{
    must_dequeue_event, must_dequeue_multiple_event, must_enqueue_event,
    must_enqueue_multiple_event, must_flush_event, must_peek_from_head_event,
    must_peek_head_event,
};
pub use rate::{
    must_dequeue, must_dequeue_multiple, must_enqueue, must_enqueue_multiple, must_flush,
    must_peek_from_head, must_peek_head,
};

use crossbeam::channel::{self, Receiver, select};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::signal::SignalReceiver;
use crate::traits::{Dequeuer, Enqueuer, Peeker};

/// Outcome of waiting for the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wait {
    Retry,
    Cancelled,
}

/// Source of retry wake-ups.
trait Trigger {
    fn wait(&mut self, done: &Receiver<()>) -> Wait;
}

/// Wakes at a fixed rate.
struct Ticker {
    ticks: Receiver<Instant>,
}

impl Ticker {
    fn new(rate: Duration) -> Self {
        Self {
            ticks: channel::tick(rate),
        }
    }
}

impl Trigger for Ticker {
    fn wait(&mut self, done: &Receiver<()>) -> Wait {
        select! {
            recv(done) -> _ => Wait::Cancelled,
            recv(self.ticks) -> _ => Wait::Retry,
        }
    }
}

/// Wakes on a queue signal, re-fetching it when it goes stale.
struct SignalTrigger<F> {
    fetch: F,
    signal: SignalReceiver,
}

impl<F: FnMut() -> SignalReceiver> SignalTrigger<F> {
    fn new(mut fetch: F) -> Self {
        let signal = fetch();
        Self { fetch, signal }
    }
}

impl<F: FnMut() -> SignalReceiver> Trigger for SignalTrigger<F> {
    fn wait(&mut self, done: &Receiver<()>) -> Wait {
        let disconnected = select! {
            recv(done) -> _ => return Wait::Cancelled,
            recv(self.signal) -> msg => msg.is_err(),
        };
        if disconnected {
            // Signals were replaced by a resize or released by close.
            trace!("Signal disconnected, re-fetching");
            self.signal = (self.fetch)();
        }
        Wait::Retry
    }
}

fn cancellation(done: Option<&Receiver<()>>) -> Receiver<()> {
    done.cloned().unwrap_or_else(channel::never)
}

fn enqueue_with<T, Q>(
    queue: &Q,
    item: T,
    done: Option<&Receiver<()>>,
    mut trigger: impl Trigger,
) -> Result<(), T>
where
    Q: Enqueuer<T> + ?Sized,
{
    let mut item = match queue.enqueue(item) {
        Ok(()) => return Ok(()),
        Err(item) => item,
    };
    let done = cancellation(done);
    loop {
        if trigger.wait(&done) == Wait::Cancelled {
            debug!(operation = "enqueue", "Blocking call cancelled, final attempt");
            return queue.enqueue(item);
        }
        match queue.enqueue(item) {
            Ok(()) => return Ok(()),
            Err(rejected) => {
                trace!(operation = "enqueue", "Queue full, retrying");
                item = rejected;
            }
        }
    }
}

fn enqueue_multiple_with<T, Q>(
    queue: &Q,
    items: Vec<T>,
    done: Option<&Receiver<()>>,
    mut trigger: impl Trigger,
) -> Result<(), Vec<T>>
where
    Q: Enqueuer<T> + ?Sized,
{
    let mut items = match queue.enqueue_multiple(items) {
        Ok(()) => return Ok(()),
        Err(remaining) => remaining,
    };
    let done = cancellation(done);
    loop {
        if trigger.wait(&done) == Wait::Cancelled {
            debug!(
                operation = "enqueue_multiple",
                remaining = items.len(),
                "Blocking call cancelled, final attempt"
            );
            return queue.enqueue_multiple(items);
        }
        match queue.enqueue_multiple(items) {
            Ok(()) => return Ok(()),
            Err(remaining) => {
                trace!(
                    operation = "enqueue_multiple",
                    remaining = remaining.len(),
                    "Queue full, retrying"
                );
                items = remaining;
            }
        }
    }
}

fn dequeue_with<T, Q>(queue: &Q, done: Option<&Receiver<()>>, mut trigger: impl Trigger) -> Option<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    if let Some(item) = queue.dequeue() {
        return Some(item);
    }
    let done = cancellation(done);
    loop {
        if trigger.wait(&done) == Wait::Cancelled {
            debug!(operation = "dequeue", "Blocking call cancelled, final attempt");
            return queue.dequeue();
        }
        if let Some(item) = queue.dequeue() {
            return Some(item);
        }
        trace!(operation = "dequeue", "Queue empty, retrying");
    }
}

fn dequeue_multiple_with<T, Q>(
    queue: &Q,
    n: usize,
    done: Option<&Receiver<()>>,
    mut trigger: impl Trigger,
) -> Vec<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    let mut items = queue.dequeue_multiple(n);
    if items.len() >= n {
        return items;
    }
    let done = cancellation(done);
    loop {
        let cancelled = trigger.wait(&done) == Wait::Cancelled;
        items.extend(queue.dequeue_multiple(n - items.len()));
        if cancelled {
            debug!(
                operation = "dequeue_multiple",
                received = items.len(),
                requested = n,
                "Blocking call cancelled after final attempt"
            );
            return items;
        }
        if items.len() >= n {
            return items;
        }
        trace!(
            operation = "dequeue_multiple",
            remaining = n - items.len(),
            "Short read, retrying"
        );
    }
}

fn flush_with<T, Q>(queue: &Q, done: Option<&Receiver<()>>, mut trigger: impl Trigger) -> Vec<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    let mut items = queue.flush();
    let done = cancellation(done);
    loop {
        let cancelled = trigger.wait(&done) == Wait::Cancelled;
        items.extend(queue.flush());
        if cancelled {
            debug!(
                operation = "flush",
                received = items.len(),
                "Blocking call cancelled after final attempt"
            );
            return items;
        }
    }
}

fn peek_head_with<T, Q>(queue: &Q, done: Option<&Receiver<()>>, mut trigger: impl Trigger) -> Option<T>
where
    Q: Peeker<T> + ?Sized,
{
    if let Some(item) = queue.peek_head() {
        return Some(item);
    }
    let done = cancellation(done);
    loop {
        if trigger.wait(&done) == Wait::Cancelled {
            debug!(operation = "peek_head", "Blocking call cancelled, final attempt");
            return queue.peek_head();
        }
        if let Some(item) = queue.peek_head() {
            return Some(item);
        }
        trace!(operation = "peek_head", "Queue empty, retrying");
    }
}

fn peek_from_head_with<T, Q>(
    queue: &Q,
    n: usize,
    done: Option<&Receiver<()>>,
    mut trigger: impl Trigger,
) -> Vec<T>
where
    Q: Peeker<T> + ?Sized,
{
    let items = queue.peek_from_head(n);
    if items.len() >= n {
        return items;
    }
    let done = cancellation(done);
    loop {
        if trigger.wait(&done) == Wait::Cancelled {
            debug!(operation = "peek_from_head", "Blocking call cancelled, final attempt");
            return queue.peek_from_head(n);
        }
        let items = queue.peek_from_head(n);
        if items.len() >= n {
            return items;
        }
        trace!(
            operation = "peek_from_head",
            visible = items.len(),
            requested = n,
            "Short read, retrying"
        );
    }
}
