//! Behaviour shared by every queue variant.
//!
//! Each check is written once against the capability traits and run for both
//! `FiniteQueue` and `InfiniteQueue`.

mod common;

use common::{Example, gen_examples};
use crossbeam::channel::TryRecvError;
use fifoq::prelude::*;
use fifoq::{FiniteQueue, InfiniteConfig, InfiniteQueue, blocking};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Every capability both variants provide.
trait Queue<T>:
    Owner<T>
    + GarbageCollector
    + Enqueuer<T>
    + EnqueueInFronter<T>
    + Dequeuer<T>
    + Peeker<T>
    + Info
    + Event
    + Send
    + Sync
{
}

impl<T, Q> Queue<T> for Q where
    Q: Owner<T>
        + GarbageCollector
        + Enqueuer<T>
        + EnqueueInFronter<T>
        + Dequeuer<T>
        + Peeker<T>
        + Info
        + Event
        + Send
        + Sync
{
}

fn finite(size: usize) -> FiniteQueue<Example> {
    FiniteQueue::new(size)
}

fn infinite(size: usize) -> InfiniteQueue<Example> {
    InfiniteQueue::with_config(
        &InfiniteConfig::with_grow_increment(size).with_signal_timeout(Duration::ZERO),
    )
}

fn check_new<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let cases = [("normal; size > 1", 10, 10), ("size 0 is clamped", 0, 1)];
    for (name, size, capacity) in cases {
        let queue = new_queue(size);
        assert_eq!(queue.capacity(), capacity, "case: {name}");
        assert_eq!(queue.length(), 0, "case: {name}");
        assert!(queue.close().is_empty(), "case: {name}");
    }
}

fn check_fifo<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(5);
    let values = gen_examples(5);
    for value in &values {
        assert!(queue.enqueue(value.clone()).is_ok());
    }
    for value in &values {
        assert_eq!(queue.dequeue().as_ref(), Some(value));
    }
    assert_eq!(queue.dequeue(), None);
}

fn check_enqueue_in_front<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(4);
    let values = gen_examples(3);
    assert!(queue.enqueue_multiple(values[..2].to_vec()).is_ok());
    assert!(queue.enqueue_in_front(values[2].clone()).is_ok());
    assert_eq!(
        queue.peek(),
        vec![values[2].clone(), values[0].clone(), values[1].clone()]
    );
    assert_eq!(queue.dequeue().as_ref(), Some(&values[2]));
}

fn check_dequeue_multiple_and_flush<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(6);
    let values = gen_examples(6);
    assert!(queue.enqueue_multiple(values.clone()).is_ok());

    assert_eq!(queue.dequeue_multiple(2), values[..2].to_vec());
    assert_eq!(queue.flush(), values[2..].to_vec());
    assert!(queue.dequeue_multiple(3).is_empty());
    assert!(queue.flush().is_empty());
}

fn check_peek_is_non_destructive<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(3);
    assert_eq!(queue.peek_head(), None);
    assert!(queue.peek().is_empty());

    let values = gen_examples(3);
    assert!(queue.enqueue_multiple(values.clone()).is_ok());
    assert_eq!(queue.peek(), values);
    assert_eq!(queue.peek_head().as_ref(), Some(&values[0]));
    assert_eq!(queue.peek_from_head(2), values[..2].to_vec());
    assert_eq!(queue.peek_from_head(10), values);
    assert_eq!(queue.length(), 3);
}

fn check_garbage_collect_preserves_order<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(4);
    let values = gen_examples(6);
    assert!(queue.enqueue_multiple(values[..4].to_vec()).is_ok());
    assert_eq!(queue.dequeue_multiple(2), values[..2].to_vec());
    // Wraps around the end of the backing storage.
    assert!(queue.enqueue_multiple(values[4..].to_vec()).is_ok());

    queue.garbage_collect();
    assert_eq!(queue.capacity(), 4);
    assert_eq!(queue.flush(), values[2..].to_vec());
}

fn check_close_releases_everything<Q: Queue<Example>>(new_queue: fn(usize) -> Q) {
    let queue = new_queue(3);
    let arrived = queue.signal_arrived();
    let removed = queue.signal_removed();
    let values = gen_examples(3);
    assert!(queue.enqueue_multiple(values.clone()).is_ok());

    assert_eq!(queue.close(), values);
    assert_eq!(queue.length(), 0);
    assert_eq!(queue.capacity(), 0);

    // Buffered tokens drain first, then the stale receivers disconnect.
    while arrived.try_recv().is_ok() {}
    assert_eq!(arrived.try_recv(), Err(TryRecvError::Disconnected));
    assert_eq!(removed.try_recv(), Err(TryRecvError::Disconnected));
    // Fresh receivers after close never fire.
    assert_eq!(queue.signal_arrived().try_recv(), Err(TryRecvError::Empty));
}

fn check_concurrent_producers<Q: Queue<Example> + 'static>(new_queue: fn(usize) -> Q) {
    const PRODUCERS: i64 = 4;
    const PER_PRODUCER: i64 = 250;

    let queue = Arc::new(new_queue(16));
    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    let item = Example::new(producer * 1000 + i);
                    let placed =
                        blocking::must_enqueue(&*queue, item, None, Duration::from_millis(1));
                    assert!(placed.is_ok());
                }
            })
        })
        .collect();

    let total = (PRODUCERS * PER_PRODUCER) as usize;
    let received =
        blocking::must_dequeue_multiple(&*queue, total, None, Duration::from_millis(1));
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(received.len(), total);
    // Per-producer order survives interleaving.
    for producer in 0..PRODUCERS {
        let sequence: Vec<i64> = received
            .iter()
            .filter(|item| item.int / 1000 == producer)
            .map(|item| item.int % 1000)
            .collect();
        assert_eq!(sequence, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
    assert_eq!(queue.length(), 0);
}

macro_rules! conformance {
    ($module:ident, $new_queue:expr) => {
        mod $module {
            use super::*;

            #[test]
            fn test_new() {
                check_new($new_queue);
            }

            #[test]
            fn test_fifo() {
                check_fifo($new_queue);
            }

            #[test]
            fn test_enqueue_in_front() {
                check_enqueue_in_front($new_queue);
            }

            #[test]
            fn test_dequeue_multiple_and_flush() {
                check_dequeue_multiple_and_flush($new_queue);
            }

            #[test]
            fn test_peek_is_non_destructive() {
                check_peek_is_non_destructive($new_queue);
            }

            #[test]
            fn test_garbage_collect_preserves_order() {
                check_garbage_collect_preserves_order($new_queue);
            }

            #[test]
            fn test_close_releases_everything() {
                check_close_releases_everything($new_queue);
            }

            #[test]
            fn test_concurrent_producers() {
                check_concurrent_producers($new_queue);
            }
        }
    };
}

conformance!(finite_queue, finite);
conformance!(infinite_queue, infinite);

#[test]
fn test_finite_resize_round_trip() {
    let queue = finite(5);
    let values = gen_examples(5);
    assert!(queue.enqueue_multiple(values.clone()).is_ok());

    assert_eq!(queue.resize(1), values[..4].to_vec());
    assert_eq!(queue.peek(), vec![values[4].clone()]);
    assert_eq!(queue.capacity(), 1);
}

#[test]
fn test_finite_lossy() {
    let queue = finite(1);
    let values = gen_examples(2);
    assert_eq!(queue.enqueue_lossy(values[0].clone()), None);
    assert_eq!(queue.enqueue_lossy(values[1].clone()).as_ref(), Some(&values[0]));
    assert_eq!(queue.peek(), vec![values[1].clone()]);
}

#[test]
fn test_finite_overflow_leaves_queue_unchanged() {
    let queue = finite(2);
    let values = gen_examples(3);
    assert!(queue.enqueue_multiple(values[..2].to_vec()).is_ok());
    assert_eq!(queue.enqueue(values[2].clone()), Err(values[2].clone()));
    assert_eq!(queue.length(), 2);
}

#[test]
fn test_infinite_never_overflows() {
    let queue = infinite(2);
    let values = gen_examples(3);
    let mut capacities = Vec::new();
    for value in values {
        assert!(queue.enqueue(value).is_ok());
        capacities.push(queue.capacity());
    }
    assert_eq!(capacities, vec![2, 2, 4]);
}
