//! Batch progress and the aggregated report.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::Record;
use crate::observability::{NoOpObserver, ProgressObserver};

/// Snapshot of batch progress after a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestProgress {
    /// Identifiers finished so far.
    pub completed: usize,
    /// Identifiers in the batch.
    pub total: usize,
    /// Successful records so far.
    pub succeeded: usize,
    /// Failed records so far.
    pub failed: usize,
    /// Most recently finished identifier.
    pub last_identifier: Option<String>,
}

impl HarvestProgress {
    /// Creates progress for a batch of `total` identifiers.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Returns the completion percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Collects records from concurrent workers.
///
/// Appends are serialized by a mutex; the completion counter is atomic so
/// progress can be read without taking the lock.
pub struct Aggregator {
    records: Mutex<Vec<Record>>,
    completed: AtomicUsize,
    succeeded: AtomicUsize,
    total: usize,
    observer: Arc<dyn ProgressObserver>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("completed", &self.completed())
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Creates an aggregator expecting `total` records.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(total)),
            completed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            total,
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Sets the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Appends a record and notifies the observer.
    ///
    /// The observer runs under the lock so snapshots arrive in order.
    pub fn push(&self, record: Record) {
        let mut records = self.records.lock();
        if record.is_success() {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        }
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        let succeeded = self.succeeded.load(Ordering::SeqCst);
        let progress = HarvestProgress {
            completed,
            total: self.total,
            succeeded,
            failed: completed - succeeded,
            last_identifier: Some(record.identifier.clone()),
        };
        self.observer.on_progress(&progress, &record);
        records.push(record);
    }

    /// Number of records appended so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Takes the collected records in completion order.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records.into_inner()
    }
}

/// Result of a harvest batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// One record per submitted identifier, in completion order.
    pub records: Vec<Record>,
    /// Identifiers submitted.
    pub total: usize,
    /// Successful records.
    pub succeeded: usize,
    /// Failed records.
    pub failed: usize,
    /// Wall time of the batch in seconds.
    pub elapsed_seconds: f64,
}

impl HarvestReport {
    /// Builds a report for `total` submitted identifiers from the collected
    /// records.
    ///
    /// Every submitted identifier without a successful record counts as
    /// failed, so a record missing from `records` still shows up in `failed`.
    #[must_use]
    pub fn new(run_id: Uuid, total: usize, records: Vec<Record>, elapsed_seconds: f64) -> Self {
        let succeeded = records.iter().filter(|r| r.is_success()).count();
        if records.len() != total {
            tracing::error!(
                %run_id,
                submitted = total,
                collected = records.len(),
                "Record count does not match submitted identifiers"
            );
        }
        Self {
            run_id,
            total,
            failed: total.saturating_sub(succeeded),
            succeeded,
            records,
            elapsed_seconds,
        }
    }

    /// Returns the record for `identifier`, if any.
    #[must_use]
    pub fn record(&self, identifier: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.identifier == identifier)
    }
}
