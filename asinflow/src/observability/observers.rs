//! Observer callbacks for attempts and batch progress.

use parking_lot::RwLock;
use std::time::Duration;

use crate::core::{AttemptState, Record};
use crate::dispatch::HarvestProgress;
use crate::errors::AttemptError;
use crate::identity::NetworkIdentity;

/// Observability callbacks for retry controller transitions.
pub trait AttemptObserver: Send + Sync {
    /// Called before an attempt is issued. `attempt` is 1-based.
    fn on_attempt_start(&self, identifier: &str, attempt: u32, network: &NetworkIdentity);

    /// Called after a failed attempt, with the state entered and the pause
    /// before the next attempt (`None` when no attempt follows).
    fn on_attempt_failed(
        &self,
        identifier: &str,
        attempt: u32,
        error: &AttemptError,
        next: AttemptState,
        delay: Option<Duration>,
    );

    /// Called once with the terminal record.
    fn on_finished(&self, record: &Record);
}

/// Observability callback for batch progress.
pub trait ProgressObserver: Send + Sync {
    /// Called after every completed identifier.
    fn on_progress(&self, progress: &HarvestProgress, record: &Record);
}

/// No-op implementation of both observer traits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl AttemptObserver for NoOpObserver {
    fn on_attempt_start(&self, _identifier: &str, _attempt: u32, _network: &NetworkIdentity) {}
    fn on_attempt_failed(
        &self,
        _identifier: &str,
        _attempt: u32,
        _error: &AttemptError,
        _next: AttemptState,
        _delay: Option<Duration>,
    ) {
    }
    fn on_finished(&self, _record: &Record) {}
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _progress: &HarvestProgress, _record: &Record) {}
}

/// Observer that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl AttemptObserver for LoggingObserver {
    fn on_attempt_start(&self, identifier: &str, attempt: u32, network: &NetworkIdentity) {
        tracing::debug!(
            identifier,
            attempt,
            relay = network.relay.as_deref().unwrap_or("direct"),
            "Attempt started"
        );
    }

    fn on_attempt_failed(
        &self,
        identifier: &str,
        attempt: u32,
        error: &AttemptError,
        next: AttemptState,
        delay: Option<Duration>,
    ) {
        tracing::warn!(
            identifier,
            attempt,
            kind = %error.kind,
            error = %error.message,
            next = %next,
            delay_ms = delay.map(|d| d.as_millis() as u64),
            "Attempt failed"
        );
    }

    fn on_finished(&self, record: &Record) {
        if record.is_success() {
            tracing::info!(
                identifier = %record.identifier,
                retries = record.retries,
                elapsed_s = record.elapsed_seconds,
                "Identifier succeeded"
            );
        } else {
            tracing::error!(
                identifier = %record.identifier,
                retries = record.retries,
                error = %record.error,
                "Identifier failed"
            );
        }
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, progress: &HarvestProgress, record: &Record) {
        tracing::info!(
            completed = progress.completed,
            total = progress.total,
            identifier = %record.identifier,
            status = %record.status,
            "Scraped ({}/{}): {}",
            progress.completed,
            progress.total,
            record.identifier
        );
    }
}

/// A collecting observer for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: RwLock<Vec<String>>,
    delays: RwLock<Vec<Option<Duration>>>,
    progress: RwLock<Vec<HarvestProgress>>,
}

impl CollectingObserver {
    /// Creates a new collecting observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded attempt events as `"<kind>:<identifier>:<attempt>"`.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.read().clone()
    }

    /// Returns the pause reported with each failed attempt, in order.
    #[must_use]
    pub fn delays(&self) -> Vec<Option<Duration>> {
        self.delays.read().clone()
    }

    /// Returns every progress snapshot in notification order.
    #[must_use]
    pub fn progress(&self) -> Vec<HarvestProgress> {
        self.progress.read().clone()
    }
}

impl AttemptObserver for CollectingObserver {
    fn on_attempt_start(&self, identifier: &str, attempt: u32, _network: &NetworkIdentity) {
        self.events.write().push(format!("start:{identifier}:{attempt}"));
    }

    fn on_attempt_failed(
        &self,
        identifier: &str,
        attempt: u32,
        _error: &AttemptError,
        next: AttemptState,
        delay: Option<Duration>,
    ) {
        self.events.write().push(format!("{next}:{identifier}:{attempt}"));
        self.delays.write().push(delay);
    }

    fn on_finished(&self, record: &Record) {
        self.events
            .write()
            .push(format!("finished:{}:{}", record.identifier, record.status));
    }
}

impl ProgressObserver for CollectingObserver {
    fn on_progress(&self, progress: &HarvestProgress, _record: &Record) {
        self.progress.write().push(progress.clone());
    }
}
