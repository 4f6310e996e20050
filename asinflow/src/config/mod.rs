//! Configuration for a harvest run.
//!
//! [`HarvestConfig`] is built once before dispatch and shared read-only by
//! every worker. Values arrive either from code via the `with_*` builders or
//! from JSON through serde; [`HarvestConfig::validate`] enforces the ranges
//! the engine accepts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::errors::AsinflowError;

/// Accepted range for [`HarvestConfig::timeout_seconds`].
pub const TIMEOUT_RANGE: RangeInclusive<u64> = 1..=30;
/// Accepted range for [`HarvestConfig::max_retries`].
pub const MAX_RETRIES_RANGE: RangeInclusive<u32> = 1..=5;
/// Accepted range for [`HarvestConfig::worker_count`].
pub const WORKER_COUNT_RANGE: RangeInclusive<usize> = 1..=16;

/// Settings for one harvest batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Hard per-attempt timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Attempts allowed per identifier.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Size of the worker pool.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Whether attempts go through a relay drawn from the relay pool.
    #[serde(default)]
    pub use_relay_rotation: bool,
    /// Marketplace origin, product pages live under `{base_url}/dp/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value sent as `Accept-Language`.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Lower bound of the randomized pause between attempts.
    #[serde(default = "default_backoff_min")]
    pub backoff_min_ms: u64,
    /// Upper bound of the randomized pause between attempts.
    #[serde(default = "default_backoff_max")]
    pub backoff_max_ms: u64,
    /// Status codes treated as soft blocking.
    #[serde(default = "default_blocked_status_codes")]
    pub blocked_status_codes: HashSet<u16>,
    /// Case-insensitive body markers of a challenge page.
    #[serde(default = "default_challenge_markers")]
    pub challenge_markers: Vec<String>,
    /// Seed for identity selection and jitter. `None` uses OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_timeout() -> u64 {
    11
}

fn default_max_retries() -> u32 {
    2
}

fn default_worker_count() -> usize {
    8
}

fn default_base_url() -> String {
    "https://www.amazon.in".to_string()
}

fn default_accept_language() -> String {
    "en-IN,en-US;q=0.9".to_string()
}

fn default_backoff_min() -> u64 {
    1000
}

fn default_backoff_max() -> u64 {
    4000
}

fn default_blocked_status_codes() -> HashSet<u16> {
    [503].into_iter().collect()
}

fn default_challenge_markers() -> Vec<String> {
    vec!["captcha".to_string()]
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            worker_count: default_worker_count(),
            use_relay_rotation: false,
            base_url: default_base_url(),
            accept_language: default_accept_language(),
            backoff_min_ms: default_backoff_min(),
            backoff_max_ms: default_backoff_max(),
            blocked_status_codes: default_blocked_status_codes(),
            challenge_markers: default_challenge_markers(),
            seed: None,
        }
    }
}

impl HarvestConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, AsinflowError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the attempt budget.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the worker pool size.
    #[must_use]
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Enables or disables relay rotation.
    #[must_use]
    pub fn with_relay_rotation(mut self, enabled: bool) -> Self {
        self.use_relay_rotation = enabled;
        self
    }

    /// Sets the marketplace origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the pause window between attempts.
    #[must_use]
    pub fn with_backoff_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.backoff_min_ms = min_ms;
        self.backoff_max_ms = max_ms;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Builds the product page URL for an identifier.
    #[must_use]
    pub fn product_url(&self, identifier: &str) -> String {
        format!("{}/dp/{}", self.base_url.trim_end_matches('/'), identifier)
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), AsinflowError> {
        if !TIMEOUT_RANGE.contains(&self.timeout_seconds) {
            return Err(AsinflowError::config(
                "timeout_seconds",
                format!(
                    "{} is outside {}..={}",
                    self.timeout_seconds,
                    TIMEOUT_RANGE.start(),
                    TIMEOUT_RANGE.end()
                ),
            ));
        }
        if !MAX_RETRIES_RANGE.contains(&self.max_retries) {
            return Err(AsinflowError::config(
                "max_retries",
                format!(
                    "{} is outside {}..={}",
                    self.max_retries,
                    MAX_RETRIES_RANGE.start(),
                    MAX_RETRIES_RANGE.end()
                ),
            ));
        }
        if !WORKER_COUNT_RANGE.contains(&self.worker_count) {
            return Err(AsinflowError::config(
                "worker_count",
                format!(
                    "{} is outside {}..={}",
                    self.worker_count,
                    WORKER_COUNT_RANGE.start(),
                    WORKER_COUNT_RANGE.end()
                ),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(AsinflowError::config("base_url", "must not be empty"));
        }
        if self.backoff_min_ms > self.backoff_max_ms {
            return Err(AsinflowError::config(
                "backoff_min_ms",
                format!(
                    "{} exceeds backoff_max_ms {}",
                    self.backoff_min_ms, self.backoff_max_ms
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = HarvestConfig::default();
        assert_eq!(config.timeout_seconds, 11);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.worker_count, 8);
        assert!(!config.use_relay_rotation);
        assert!(config.blocked_status_codes.contains(&503));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = HarvestConfig::new()
            .with_timeout_seconds(5)
            .with_max_retries(4)
            .with_worker_count(3)
            .with_relay_rotation(true)
            .with_backoff_ms(0, 0)
            .with_seed(7);

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.worker_count, 3);
        assert!(config.use_relay_rotation);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = HarvestConfig::new().with_timeout_seconds(0).validate();
        assert!(matches!(err, Err(AsinflowError::Config(msg)) if msg.starts_with("timeout_seconds")));

        let err = HarvestConfig::new().with_max_retries(6).validate();
        assert!(matches!(err, Err(AsinflowError::Config(msg)) if msg.starts_with("max_retries")));

        let err = HarvestConfig::new().with_worker_count(17).validate();
        assert!(matches!(err, Err(AsinflowError::Config(msg)) if msg.starts_with("worker_count")));

        let err = HarvestConfig::new().with_backoff_ms(10, 5).validate();
        assert!(matches!(err, Err(AsinflowError::Config(msg)) if msg.starts_with("backoff_min_ms")));
    }

    #[test]
    fn test_product_url() {
        let config = HarvestConfig::new().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.product_url("B000123456"), "http://127.0.0.1:9000/dp/B000123456");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = HarvestConfig::from_json(r#"{"max_retries": 3, "use_relay_rotation": true}"#)
            .expect("valid json");
        assert_eq!(config.max_retries, 3);
        assert!(config.use_relay_rotation);
        assert_eq!(config.worker_count, 8);
        assert_eq!(config.accept_language, "en-IN,en-US;q=0.9");
    }

    #[test]
    fn test_from_json_validates() {
        let result = HarvestConfig::from_json(r#"{"worker_count": 0}"#);
        assert!(matches!(result, Err(AsinflowError::Config(_))));

        let result = HarvestConfig::from_json("not json");
        assert!(matches!(result, Err(AsinflowError::Serialization(_))));
    }
}
