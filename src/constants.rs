//! Default values shared by configuration and constructors.

use std::time::Duration;

/// Smallest capacity a finite queue can have; smaller requests are clamped.
pub const MIN_CAPACITY: usize = 1;

/// Smallest grow increment an infinite queue can have.
pub const MIN_GROW_INCREMENT: usize = 1;

/// Default signal timeout for finite queues (signals are buffered).
pub const FINITE_SIGNAL_TIMEOUT: Duration = Duration::ZERO;

/// Default signal timeout for infinite queues (signals are unbuffered).
pub const INFINITE_SIGNAL_TIMEOUT: Duration = Duration::from_millis(1);

/// Default retry period for the rate-based blocking combinators.
pub const DEFAULT_RETRY_RATE: Duration = Duration::from_millis(10);
