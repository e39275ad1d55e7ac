//! Shared fixtures for integration tests.

#![allow(dead_code)]

use crossbeam::channel::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Opaque payload stored in the queues under test.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub int: i64,
    pub float: f64,
    pub string: String,
}

impl Example {
    pub fn new(int: i64) -> Self {
        Self {
            int,
            float: int as f64 * 0.5,
            string: format!("example-{int}"),
        }
    }
}

/// `n` distinct payloads, numbered from 0.
pub fn gen_examples(n: usize) -> Vec<Example> {
    (0..n as i64).map(Example::new).collect()
}

/// Cancellation receiver whose sender is dropped after `delay`.
pub fn cancel_after(delay: Duration) -> Receiver<()> {
    let (tx, rx) = channel::bounded::<()>(0);
    thread::spawn(move || {
        thread::sleep(delay);
        drop(tx);
    });
    rx
}
