//! Configuration types for queues and blocking combinators.
//!
//! Every queue receives its signal timeout through its own configuration
//! value; there is no process-wide setting. Configuration can be built in
//! code or loaded from TOML:
//!
//! ```toml
//! [finite]
//! capacity = 128
//! signal_timeout_ms = 0
//!
//! [infinite]
//! grow_increment = 64
//! signal_timeout_ms = 1
//!
//! [blocking]
//! retry_rate_ms = 10
//! ```
//!
//! Missing sections and fields fall back to the defaults in [`crate::constants`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::error::{Error, Result};

/// Serde helper for `Duration` as whole milliseconds.
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Settings for a fixed-capacity queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiniteConfig {
    /// Maximum number of items; 0 is clamped to 1.
    pub capacity: usize,
    /// How long a signal send may wait for room before it is dropped.
    #[serde(rename = "signal_timeout_ms", with = "duration_ms")]
    pub signal_timeout: Duration,
}

impl Default for FiniteConfig {
    fn default() -> Self {
        Self {
            capacity: constants::MIN_CAPACITY,
            signal_timeout: constants::FINITE_SIGNAL_TIMEOUT,
        }
    }
}

impl FiniteConfig {
    /// Config with the given capacity and default signal timeout.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the signal timeout.
    #[must_use]
    pub const fn with_signal_timeout(mut self, timeout: Duration) -> Self {
        self.signal_timeout = timeout;
        self
    }
}

/// Settings for a capacity-growing queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfiniteConfig {
    /// Capacity added whenever the backing storage is exhausted; 0 is clamped to 1.
    pub grow_increment: usize,
    /// How long a signal send may wait for a receiver before it is dropped.
    #[serde(rename = "signal_timeout_ms", with = "duration_ms")]
    pub signal_timeout: Duration,
}

impl Default for InfiniteConfig {
    fn default() -> Self {
        Self {
            grow_increment: constants::MIN_GROW_INCREMENT,
            signal_timeout: constants::INFINITE_SIGNAL_TIMEOUT,
        }
    }
}

impl InfiniteConfig {
    /// Config with the given grow increment and default signal timeout.
    #[must_use]
    pub fn with_grow_increment(grow_increment: usize) -> Self {
        Self {
            grow_increment,
            ..Self::default()
        }
    }

    /// Set the signal timeout.
    #[must_use]
    pub const fn with_signal_timeout(mut self, timeout: Duration) -> Self {
        self.signal_timeout = timeout;
        self
    }
}

/// Settings for the rate-based blocking combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockingConfig {
    /// Period between retries.
    #[serde(rename = "retry_rate_ms", with = "duration_ms")]
    pub retry_rate: Duration,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            retry_rate: constants::DEFAULT_RETRY_RATE,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub finite: FiniteConfig,
    pub infinite: InfiniteConfig,
    pub blocking: BlockingConfig,
}

impl Config {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the TOML is malformed, has unknown keys or
    /// values of the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields are unknown or have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Validate configuration values.
    ///
    /// Values the queues correct on their own (a zero capacity or grow
    /// increment) produce warnings; values no component can work with are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `blocking.retry_rate_ms` is zero.
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        if self.blocking.retry_rate.is_zero() {
            return Err(Error::config("blocking.retry_rate_ms must be greater than 0"));
        }

        if self.finite.capacity < constants::MIN_CAPACITY {
            result.warnings.push(format!(
                "finite.capacity = {} will be clamped to {}",
                self.finite.capacity,
                constants::MIN_CAPACITY
            ));
        }

        if self.infinite.grow_increment < constants::MIN_GROW_INCREMENT {
            result.warnings.push(format!(
                "infinite.grow_increment = {} will be clamped to {}",
                self.infinite.grow_increment,
                constants::MIN_GROW_INCREMENT
            ));
        }

        if self.infinite.signal_timeout.is_zero() {
            result.warnings.push(
                "infinite.signal_timeout_ms = 0: signals are unbuffered and will only reach \
                 receivers that are already waiting"
                    .to_string(),
            );
        }

        Ok(result)
    }
}
