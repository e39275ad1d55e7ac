//! Producer/consumer demo over a finite and an infinite queue.
//!
//! Producers push through a small finite queue with the rate-based
//! combinators, a relay moves batches into an infinite queue, and the main
//! thread drains it with an event-driven combinator.
//!
//! Run with:
//! ```bash
//! RUST_LOG=fifoq=debug cargo run --example producer_consumer [config.toml]
//! ```

use std::env;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use fifoq::prelude::*;
use fifoq::{Config, FiniteQueue, InfiniteQueue, blocking};
use tracing::{info, warn};

const PRODUCERS: u32 = 3;
const ITEMS_PER_PRODUCER: u32 = 20;

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn load_config() -> Result<Config> {
    let config = match env::args().nth(1) {
        Some(path) => Config::load_from(&path).with_context(|| format!("loading {path}"))?,
        None => Config {
            finite: fifoq::FiniteConfig::with_capacity(4),
            ..Config::default()
        },
    };
    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let config = load_config()?;
    let rate = config.blocking.retry_rate;

    let inbox: Arc<FiniteQueue<(u32, u32)>> = Arc::new(FiniteQueue::with_config(&config.finite));
    let outbox: Arc<InfiniteQueue<(u32, u32)>> =
        Arc::new(InfiniteQueue::with_config(&config.infinite));
    let total = (PRODUCERS * ITEMS_PER_PRODUCER) as usize;

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let inbox = Arc::clone(&inbox);
            thread::spawn(move || {
                for seq in 0..ITEMS_PER_PRODUCER {
                    if blocking::must_enqueue(&*inbox, (producer, seq), None, rate).is_err() {
                        warn!(producer, seq, "Item rejected");
                    }
                }
            })
        })
        .collect();

    let relay = {
        let inbox = Arc::clone(&inbox);
        let outbox = Arc::clone(&outbox);
        thread::spawn(move || {
            let mut moved = 0;
            while moved < total {
                let batch = blocking::must_dequeue_multiple(&*inbox, total - moved, None, rate);
                moved += batch.len();
                if let Err(rest) = outbox.enqueue_multiple(batch) {
                    warn!(lost = rest.len(), "Outbox refused items");
                }
            }
        })
    };

    for producer in producers {
        producer
            .join()
            .map_err(|_| anyhow::anyhow!("producer panicked"))?;
    }
    relay.join().map_err(|_| anyhow::anyhow!("relay panicked"))?;

    info!(
        length = outbox.length(),
        capacity = outbox.capacity(),
        "Relay finished"
    );
    outbox.garbage_collect();
    info!(capacity = outbox.capacity(), "Outbox compacted");

    let deadline = crossbeam::channel::after(Duration::from_millis(100));
    let (done_tx, done_rx) = crossbeam::channel::bounded::<()>(1);
    thread::spawn(move || {
        let _ = deadline.recv();
        let _ = done_tx.send(());
    });
    let drained = blocking::must_dequeue_multiple_event(&*outbox, total, Some(&done_rx));
    info!(drained = drained.len(), expected = total, "Outbox drained");

    for producer in 0..PRODUCERS {
        let in_order = drained
            .iter()
            .filter(|(p, _)| *p == producer)
            .map(|(_, seq)| *seq)
            .eq(0..ITEMS_PER_PRODUCER);
        info!(producer, in_order, "Per-producer order");
    }

    let leftovers = inbox.close();
    info!(leftovers = leftovers.len(), "Inbox closed");
    Ok(())
}
