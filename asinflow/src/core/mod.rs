//! Core domain model types for asinflow.
//!
//! This module contains:
//! - Record status and retry state enums
//! - The per-identifier output record

mod record;
mod status;

pub use record::Record;
pub use status::{AttemptState, RecordStatus};
