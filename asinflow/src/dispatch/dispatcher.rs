//! Bounded concurrent processing of an identifier batch.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use uuid::Uuid;

use super::context::HarvestContext;
use super::progress::{Aggregator, HarvestReport};
use crate::core::Record;
use crate::errors::AsinflowError;
use crate::input::Identifier;
use crate::retry::rng_for;

/// Runs a batch of identifiers through the retry controller with at most
/// `worker_count` identifiers in flight.
///
/// Records are collected in completion order, not submission order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    context: HarvestContext,
}

impl Dispatcher {
    /// Creates a dispatcher over a validated context.
    #[must_use]
    pub fn new(context: HarvestContext) -> Self {
        Self { context }
    }

    /// Processes every identifier and returns one record per identifier.
    ///
    /// Duplicates are processed independently. A worker that aborts still
    /// yields a `Failed` record for its identifier.
    pub async fn run(&self, identifiers: Vec<Identifier>) -> Result<HarvestReport, AsinflowError> {
        if identifiers.is_empty() {
            return Err(AsinflowError::EmptyInput);
        }

        let config = self.context.config();
        let run_id = Uuid::new_v4();
        let total = identifiers.len();
        let start = Instant::now();

        tracing::info!(
            %run_id,
            total,
            workers = config.worker_count,
            relay_rotation = config.use_relay_rotation,
            "Harvest started"
        );

        let semaphore = Arc::new(Semaphore::new(config.worker_count));
        let controller = Arc::new(self.context.controller());
        let aggregator = Aggregator::new(total).with_observer(self.context.progress_observer());
        let seed = config.seed;

        let mut tasks = FuturesUnordered::new();
        for (index, identifier) in identifiers.into_iter().enumerate() {
            let identifier = identifier.into_inner();
            let semaphore = Arc::clone(&semaphore);
            let controller = Arc::clone(&controller);
            let task_identifier = identifier.clone();

            let handle = tokio::spawn(async move {
                // Acquisition fails only on a closed semaphore; this one is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                let mut rng = rng_for(seed, index);
                controller.run(&task_identifier, &mut rng).await
            });
            tasks.push(async move { (identifier, handle.await) });
        }

        while let Some((identifier, joined)) = tasks.next().await {
            let record = match joined {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(identifier = %identifier, error = %e, "Worker aborted");
                    Record::failed(
                        identifier,
                        format!("Worker aborted: {e}"),
                        config.max_retries,
                        0.0,
                    )
                }
            };
            aggregator.push(record);
        }

        let report = HarvestReport::new(
            run_id,
            total,
            aggregator.into_records(),
            start.elapsed().as_secs_f64(),
        );

        tracing::info!(
            %run_id,
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            elapsed_s = report.elapsed_seconds,
            "Harvest finished"
        );

        Ok(report)
    }
}
