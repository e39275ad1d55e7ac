//! Combinators that retry at a fixed rate.
//!
//! `rate` is the ticker period; [`BlockingConfig`](crate::BlockingConfig)
//! carries a configurable default. A zero rate retries without pausing.

use crossbeam::channel::Receiver;
use std::time::Duration;

use super::Ticker;
use crate::traits::{Dequeuer, Enqueuer, Peeker};

/// Enqueue `item`, retrying every `rate` until it fits.
///
/// # Errors
///
/// Overflow after cancellation: the item is handed back.
pub fn must_enqueue<T, Q>(
    queue: &Q,
    item: T,
    done: Option<&Receiver<()>>,
    rate: Duration,
) -> Result<(), T>
where
    Q: Enqueuer<T> + ?Sized,
{
    super::enqueue_with(queue, item, done, Ticker::new(rate))
}

/// Enqueue `items`, retrying the remainder every `rate` until all fit.
///
/// # Errors
///
/// Overflow after cancellation: the items that were never placed.
pub fn must_enqueue_multiple<T, Q>(
    queue: &Q,
    items: Vec<T>,
    done: Option<&Receiver<()>>,
    rate: Duration,
) -> Result<(), Vec<T>>
where
    Q: Enqueuer<T> + ?Sized,
{
    super::enqueue_multiple_with(queue, items, done, Ticker::new(rate))
}

/// Dequeue one item, retrying every `rate`. `None` only after cancellation.
pub fn must_dequeue<T, Q>(queue: &Q, done: Option<&Receiver<()>>, rate: Duration) -> Option<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    super::dequeue_with(queue, done, Ticker::new(rate))
}

/// Dequeue `n` items, accumulating partial reads.
///
/// Returns fewer than `n` items only after cancellation.
pub fn must_dequeue_multiple<T, Q>(
    queue: &Q,
    n: usize,
    done: Option<&Receiver<()>>,
    rate: Duration,
) -> Vec<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    super::dequeue_multiple_with(queue, n, done, Ticker::new(rate))
}

/// Flush every `rate` and collect the results until `done` fires.
///
/// With `done` set to `None` this never returns.
pub fn must_flush<T, Q>(queue: &Q, done: Option<&Receiver<()>>, rate: Duration) -> Vec<T>
where
    Q: Dequeuer<T> + ?Sized,
{
    super::flush_with(queue, done, Ticker::new(rate))
}

/// Copy the head item once one is present. `None` only after cancellation.
pub fn must_peek_head<T, Q>(queue: &Q, done: Option<&Receiver<()>>, rate: Duration) -> Option<T>
where
    Q: Peeker<T> + ?Sized,
{
    super::peek_head_with(queue, done, Ticker::new(rate))
}

/// Copy the first `n` items once that many are present.
///
/// After cancellation, returns whatever is visible at that moment.
pub fn must_peek_from_head<T, Q>(
    queue: &Q,
    n: usize,
    done: Option<&Receiver<()>>,
    rate: Duration,
) -> Vec<T>
where
    Q: Peeker<T> + ?Sized,
{
    super::peek_from_head_with(queue, n, done, Ticker::new(rate))
}
