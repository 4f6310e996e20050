//! Batch dispatch over a bounded worker pool.
//!
//! This module provides:
//! - [`HarvestContext`], the validated config and shared collaborators
//! - [`Dispatcher`], which fans identifiers out to retry controllers
//! - [`Aggregator`], [`HarvestProgress`] and [`HarvestReport`] for results

mod context;
mod dispatcher;
mod progress;


pub use context::HarvestContext;
pub use dispatcher::Dispatcher;
pub use progress::{Aggregator, HarvestProgress, HarvestReport};
