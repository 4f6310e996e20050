//! # Asinflow
//!
//! A concurrent, fault-tolerant product-page fetch-and-extract engine.
//!
//! Given a batch of product identifiers, asinflow retrieves each product
//! page, detects soft blocking, retries with a rotated network identity and
//! extracts a fixed set of fields using ordered fallback heuristics:
//!
//! - **Identity rotation**: a fresh client identity and relay per attempt
//! - **Bounded concurrency**: a fixed-size worker pool over the batch
//! - **Retry state machine**: blocked and transport failures share one budget
//! - **Fallback extraction**: every field is a cascade of selectors
//! - **One record per identifier**: failures are records, never dropped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use asinflow::prelude::*;
//!
//! init_logging(LogFormat::Text);
//!
//! let config = HarvestConfig::new().with_worker_count(4);
//! let context = HarvestContext::http(config)?
//!     .with_relays(RelayPool::load("proxies.txt")?);
//!
//! let identifiers = parse_identifiers("B000123456\nhttps://www.amazon.in/dp/B000ABCDEF");
//! let report = Dispatcher::new(context).run(identifiers).await?;
//! println!("{} of {} succeeded", report.succeeded, report.total);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss
)]

pub mod config;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod identity;
pub mod input;
pub mod observability;
pub mod retry;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::HarvestConfig;
    pub use crate::core::{AttemptState, Record, RecordStatus};
    pub use crate::dispatch::{Dispatcher, HarvestContext, HarvestProgress, HarvestReport};
    pub use crate::errors::{AsinflowError, AttemptError, AttemptErrorKind};
    pub use crate::export::{export_filename, write_csv, RECORD_COLUMNS};
    pub use crate::extract::{ProductExtractor, ProductFields};
    #[cfg(feature = "http")]
    pub use crate::fetch::HttpFetcher;
    pub use crate::fetch::{FetchOutcome, FetchRequest, Fetcher};
    pub use crate::identity::{IdentityPool, IdentityRotator, NetworkIdentity, RelayPool};
    pub use crate::input::{parse_identifiers, Identifier};
    pub use crate::observability::{
        init_logging, AttemptObserver, LogFormat, LoggingObserver, NoOpObserver,
        ProgressObserver,
    };
    pub use crate::retry::{BackoffWindow, RetryController};
}
