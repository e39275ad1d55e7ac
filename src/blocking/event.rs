//! Combinators that retry when the queue signals a change.
//!
//! Signals are best-effort, so a missed notification can leave a combinator
//! waiting although a retry would now succeed. Pass a `done` receiver, or use
//! the [`rate`](super::rate) combinators, when that matters.

use crossbeam::channel::Receiver;

use super::SignalTrigger;
use crate::traits::{Dequeuer, Enqueuer, Event, Peeker};

/// Enqueue `item`, retrying whenever an item is removed.
///
/// # Errors
///
/// Overflow after cancellation: the item is handed back.
pub fn must_enqueue_event<T, Q>(queue: &Q, item: T, done: Option<&Receiver<()>>) -> Result<(), T>
where
    Q: Enqueuer<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_removed());
    super::enqueue_with(queue, item, done, trigger)
}

/// Enqueue `items`, retrying the remainder whenever an item is removed.
///
/// # Errors
///
/// Overflow after cancellation: the items that were never placed.
pub fn must_enqueue_multiple_event<T, Q>(
    queue: &Q,
    items: Vec<T>,
    done: Option<&Receiver<()>>,
) -> Result<(), Vec<T>>
where
    Q: Enqueuer<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_removed());
    super::enqueue_multiple_with(queue, items, done, trigger)
}

/// Dequeue one item, retrying whenever an item arrives.
pub fn must_dequeue_event<T, Q>(queue: &Q, done: Option<&Receiver<()>>) -> Option<T>
where
    Q: Dequeuer<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_arrived());
    super::dequeue_with(queue, done, trigger)
}

/// Dequeue `n` items, accumulating partial reads as items arrive.
pub fn must_dequeue_multiple_event<T, Q>(queue: &Q, n: usize, done: Option<&Receiver<()>>) -> Vec<T>
where
    Q: Dequeuer<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_arrived());
    super::dequeue_multiple_with(queue, n, done, trigger)
}

/// Flush on every arrival and collect the results until `done` fires.
///
/// With `done` set to `None` this never returns.
pub fn must_flush_event<T, Q>(queue: &Q, done: Option<&Receiver<()>>) -> Vec<T>
where
    Q: Dequeuer<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_arrived());
    super::flush_with(queue, done, trigger)
}

/// Copy the head item once one arrives.
pub fn must_peek_head_event<T, Q>(queue: &Q, done: Option<&Receiver<()>>) -> Option<T>
where
    Q: Peeker<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_arrived());
    super::peek_head_with(queue, done, trigger)
}

/// Copy the first `n` items once that many have arrived.
pub fn must_peek_from_head_event<T, Q>(queue: &Q, n: usize, done: Option<&Receiver<()>>) -> Vec<T>
where
    Q: Peeker<T> + Event + ?Sized,
{
    let trigger = SignalTrigger::new(|| queue.signal_arrived());
    super::peek_from_head_with(queue, n, done, trigger)
}
