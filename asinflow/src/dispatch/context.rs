//! Everything a harvest run needs, assembled once before dispatch.

use std::sync::Arc;

use crate::config::HarvestConfig;
use crate::errors::AsinflowError;
use crate::extract::ProductExtractor;
use crate::fetch::Fetcher;
use crate::identity::{IdentityPool, IdentityRotator, RelayPool};
use crate::observability::{AttemptObserver, LoggingObserver, ProgressObserver};
use crate::retry::RetryController;

/// Validated configuration plus the shared collaborators of a run.
///
/// Pools, fetcher, extractor and observers are `Arc`s and are shared
/// read-only by every worker.
#[derive(Clone)]
pub struct HarvestContext {
    config: HarvestConfig,
    identities: IdentityPool,
    relays: RelayPool,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<ProductExtractor>,
    attempt_observer: Arc<dyn AttemptObserver>,
    progress_observer: Arc<dyn ProgressObserver>,
}

impl std::fmt::Debug for HarvestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestContext")
            .field("config", &self.config)
            .field("identities", &self.identities.len())
            .field("relays", &self.relays.len())
            .finish_non_exhaustive()
    }
}

impl HarvestContext {
    /// Validates `config` and builds a context around `fetcher`.
    ///
    /// Uses the built-in identity pool, no relays and logging observers;
    /// override them with the `with_*` methods.
    pub fn new(config: HarvestConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, AsinflowError> {
        config.validate()?;
        Ok(Self {
            config,
            identities: IdentityPool::default(),
            relays: RelayPool::empty(),
            fetcher,
            extractor: Arc::new(ProductExtractor::new()?),
            attempt_observer: Arc::new(LoggingObserver),
            progress_observer: Arc::new(LoggingObserver),
        })
    }

    /// Builds a context that fetches over HTTP.
    #[cfg(feature = "http")]
    pub fn http(config: HarvestConfig) -> Result<Self, AsinflowError> {
        let fetcher = Arc::new(crate::fetch::HttpFetcher::new(&config)?);
        Self::new(config, fetcher)
    }

    /// Replaces the identity pool.
    #[must_use]
    pub fn with_identities(mut self, identities: IdentityPool) -> Self {
        self.identities = identities;
        self
    }

    /// Replaces the relay pool.
    #[must_use]
    pub fn with_relays(mut self, relays: RelayPool) -> Self {
        self.relays = relays;
        self
    }

    /// Replaces the attempt observer.
    #[must_use]
    pub fn with_attempt_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.attempt_observer = observer;
        self
    }

    /// Replaces the progress observer.
    #[must_use]
    pub fn with_progress_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress_observer = observer;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub(crate) fn progress_observer(&self) -> Arc<dyn ProgressObserver> {
        Arc::clone(&self.progress_observer)
    }

    /// Builds the retry controller shared by the run's workers.
    pub(crate) fn controller(&self) -> RetryController {
        let rotator = IdentityRotator::new(
            self.identities.clone(),
            self.relays.clone(),
            self.config.use_relay_rotation,
        );
        if self.config.use_relay_rotation && !rotator.relays_enabled() {
            tracing::warn!("Relay rotation enabled with an empty relay pool, connecting directly");
        }
        RetryController::new(
            &self.config,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            rotator,
        )
        .with_observer(Arc::clone(&self.attempt_observer))
    }
}
