//! Retry handling for a single identifier.
//!
//! This module provides:
//! - [`RetryState`], the per-identifier attempt bookkeeping
//! - [`BackoffWindow`], the randomized pause between attempts
//! - [`RetryController`], the state machine driving attempts to a record

mod controller;
mod state;

pub use controller::RetryController;
pub use state::{rng_for, BackoffWindow, RetryState};
