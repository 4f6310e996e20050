//! Per-identifier retry state machine.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use super::state::{BackoffWindow, RetryState};
use crate::config::HarvestConfig;
use crate::core::Record;
use crate::extract::ProductExtractor;
use crate::fetch::{FetchRequest, Fetcher};
use crate::identity::IdentityRotator;
use crate::observability::{AttemptObserver, NoOpObserver};

/// Drives one identifier from `Pending` to `Succeeded` or `Failed`.
///
/// Every attempt draws a fresh identity/relay pair. Blocked and transport
/// failures are handled the same way: they consume an attempt and, budget
/// permitting, are followed by a randomized pause and another attempt.
#[derive(Clone)]
pub struct RetryController {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<ProductExtractor>,
    rotator: IdentityRotator,
    observer: Arc<dyn AttemptObserver>,
    backoff: BackoffWindow,
    max_retries: u32,
    timeout: Duration,
    base_url: String,
}

impl std::fmt::Debug for RetryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryController")
            .field("rotator", &self.rotator)
            .field("backoff", &self.backoff)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RetryController {
    /// Creates a controller using the attempt budget, timeout, pause window
    /// and marketplace origin from `config`.
    #[must_use]
    pub fn new(
        config: &HarvestConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<ProductExtractor>,
        rotator: IdentityRotator,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            rotator,
            observer: Arc::new(NoOpObserver),
            backoff: BackoffWindow::from_config(config),
            max_retries: config.max_retries.max(1),
            timeout: config.timeout(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sets the attempt observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Overrides the pause window.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffWindow) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the attempt budget.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Processes one identifier to its terminal record.
    pub async fn run<R: Rng + Send>(&self, identifier: &str, rng: &mut R) -> Record {
        let mut state = RetryState::new();
        let url = format!("{}/dp/{}", self.base_url, identifier);

        loop {
            let attempt = state.begin_attempt();
            let network = self.rotator.rotate(rng);
            self.observer.on_attempt_start(identifier, attempt, &network);

            let request = FetchRequest {
                identifier: identifier.to_string(),
                url: url.clone(),
                identity: network.identity,
                relay: network.relay,
                timeout: self.timeout,
            };

            let error = match self.fetcher.fetch(&request).await.into_result() {
                Ok((markup, status)) => {
                    let fields = self.extractor.extract(&markup);
                    state.succeed();
                    tracing::debug!(identifier, attempt, status, "Page extracted");
                    let record = Record::success(
                        identifier,
                        fields,
                        state.attempts_used,
                        state.elapsed_seconds(),
                    );
                    self.observer.on_finished(&record);
                    return record;
                }
                Err(error) => error,
            };

            let next = state.record_failure(&error, self.max_retries);
            if next.is_terminal() {
                self.observer
                    .on_attempt_failed(identifier, attempt, &error, next, None);
                let record = Record::failed(
                    identifier,
                    state.last_error.as_str(),
                    state.attempts_used,
                    state.elapsed_seconds(),
                );
                self.observer.on_finished(&record);
                return record;
            }

            let delay = self.backoff.sample(rng);
            self.observer
                .on_attempt_failed(identifier, attempt, &error, next, Some(delay));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
