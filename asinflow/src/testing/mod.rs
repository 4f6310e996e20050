//! Testing utilities for asinflow.
//!
//! This module provides:
//! - A scripted fetcher that replays outcomes per identifier
//! - Product page markup fixtures

pub mod fixtures;
mod mocks;

pub use mocks::ScriptedFetcher;
