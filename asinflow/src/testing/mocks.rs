//! Mock fetchers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::fetch::{FetchOutcome, FetchRequest, Fetcher};

/// A fetcher that replays scripted outcomes per identifier.
///
/// Each identifier has a queue of outcomes consumed one per attempt; once a
/// queue is exhausted (or for unscripted identifiers) the default outcome is
/// returned. Every request is recorded.
#[derive(Debug)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<FetchOutcome>>>,
    default: FetchOutcome,
    delay: Option<Duration>,
    requests: Mutex<Vec<FetchRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedFetcher {
    /// Creates a fetcher whose default outcome is a transport failure.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            default: FetchOutcome::transport("no scripted response"),
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Queues outcomes for an identifier.
    #[must_use]
    pub fn script(self, identifier: impl Into<String>, outcomes: Vec<FetchOutcome>) -> Self {
        self.scripts
            .lock()
            .entry(identifier.into())
            .or_default()
            .extend(outcomes);
        self
    }

    /// Sets the outcome for unscripted or exhausted identifiers.
    #[must_use]
    pub fn with_default(mut self, outcome: FetchOutcome) -> Self {
        self.default = outcome;
        self
    }

    /// Makes every fetch wait before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns all recorded requests.
    #[must_use]
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    /// Returns the recorded requests for one identifier.
    #[must_use]
    pub fn requests_for(&self, identifier: &str) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.identifier == identifier)
            .cloned()
            .collect()
    }

    /// Returns the number of attempts made for one identifier.
    #[must_use]
    pub fn call_count(&self, identifier: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.identifier == identifier)
            .count()
    }

    /// Highest number of fetches observed in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        self.requests.lock().push(request.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.scripts
            .lock()
            .get_mut(&request.identifier)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> FetchRequest {
        FetchRequest {
            identifier: id.to_string(),
            url: format!("https://example.test/dp/{id}"),
            identity: "ua".to_string(),
            relay: None,
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_scripted_outcomes_then_default() {
        let fetcher = ScriptedFetcher::new()
            .script("A", vec![FetchOutcome::blocked("first"), FetchOutcome::ok("page", 200)])
            .with_default(FetchOutcome::transport("done"));

        assert_eq!(fetcher.fetch(&request("A")).await, FetchOutcome::blocked("first"));
        assert_eq!(fetcher.fetch(&request("A")).await, FetchOutcome::ok("page", 200));
        assert_eq!(fetcher.fetch(&request("A")).await, FetchOutcome::transport("done"));
        assert_eq!(fetcher.fetch(&request("B")).await, FetchOutcome::transport("done"));

        assert_eq!(fetcher.call_count("A"), 3);
        assert_eq!(fetcher.requests_for("B").len(), 1);
        assert_eq!(fetcher.requests().len(), 4);
    }
}
