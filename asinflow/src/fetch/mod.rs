//! Single-attempt page fetching.
//!
//! This module provides:
//! - The [`Fetcher`] protocol used by the retry controller
//! - [`FetchOutcome`], the classified result of one attempt
//! - Response classification (blocking status, challenge markers)
//! - An HTTP implementation backed by reqwest

mod classify;
#[cfg(feature = "http")]
mod http;
mod protocols;

pub use classify::{classify_response, BlockPolicy, CHALLENGE_REASON};
#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use protocols::{FetchOutcome, FetchRequest, Fetcher};
