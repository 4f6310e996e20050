//! Observability utilities.

mod logging;
mod observers;

pub use logging::{init_logging, LogFormat, DEFAULT_FILTER};
pub use observers::{
    AttemptObserver, CollectingObserver, LoggingObserver, NoOpObserver, ProgressObserver,
};
