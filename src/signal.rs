//! Best-effort presence signals.
//!
//! Each queue owns two signals (item arrived, item removed). A signal is a
//! bounded `crossbeam` channel of `()`: its buffering depth decides how many
//! undelivered signals can pile up before further sends are dropped. Sending
//! never fails a mutation; a dropped signal is expected, not an error.
//!
//! Dropping a [`Signal`] disconnects every receiver handed out from it, so a
//! waiter holding a stale receiver observes disconnection rather than silence.

use crossbeam::channel::{self, Receiver, Sender};
use std::time::Duration;
use tracing::trace;

/// Receiving half of a queue signal.
pub type SignalReceiver = Receiver<()>;

/// One direction of queue notifications.
#[derive(Debug)]
pub(crate) struct Signal {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Signal {
    /// Create a signal that buffers up to `depth` pending notifications.
    /// A depth of 0 only delivers to receivers that are already waiting.
    pub(crate) fn with_depth(depth: usize) -> Self {
        let (tx, rx) = channel::bounded(depth);
        Self { tx, rx }
    }

    /// Receiver observing this signal.
    pub(crate) fn receiver(&self) -> SignalReceiver {
        self.rx.clone()
    }

    /// Fire the signal, giving up after `timeout`.
    pub(crate) fn fire(&self, timeout: Duration) -> bool {
        send_signal(&self.tx, timeout)
    }
}

/// Both signals of a queue.
#[derive(Debug)]
pub(crate) struct Signals {
    pub(crate) arrived: Signal,
    pub(crate) removed: Signal,
}

impl Signals {
    pub(crate) fn with_depth(depth: usize) -> Self {
        Self {
            arrived: Signal::with_depth(depth),
            removed: Signal::with_depth(depth),
        }
    }
}

/// Send a presence token without blocking past `timeout`.
///
/// With a zero timeout the send happens only if the channel can take it
/// immediately. Returns whether the token was delivered.
pub fn send_signal(sender: &Sender<()>, timeout: Duration) -> bool {
    let delivered = if timeout.is_zero() {
        sender.try_send(()).is_ok()
    } else {
        sender.send_timeout((), timeout).is_ok()
    };
    if !delivered {
        trace!(timeout_us = timeout.as_micros() as u64, "Signal dropped");
    }
    delivered
}

/// Receiver for queues whose signals have been released by `close`.
pub(crate) fn closed_receiver() -> SignalReceiver {
    channel::never()
}
