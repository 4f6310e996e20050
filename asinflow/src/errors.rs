//! Error types for asinflow.
//!
//! Per-attempt failures (blocking, transport errors) are ordinary values
//! carried by [`FetchOutcome`](crate::fetch::FetchOutcome) and absorbed by the
//! retry controller. Only setup problems and an empty batch surface as
//! [`AsinflowError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for asinflow operations.
#[derive(Debug, Error)]
pub enum AsinflowError {
    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The dispatcher was handed zero identifiers.
    #[error("No identifiers supplied")]
    EmptyInput,

    /// A CSS selector failed to parse.
    #[error("Invalid selector '{selector}': {reason}")]
    Selector {
        /// The selector source text.
        selector: String,
        /// Parser message.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsinflowError {
    /// Creates a configuration error for a named field.
    #[must_use]
    pub fn config(field: &str, message: impl std::fmt::Display) -> Self {
        Self::Config(format!("{field}: {message}"))
    }
}

impl From<serde_json::Error> for AsinflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AsinflowError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return Self::Io(io);
            }
            return Self::Csv("I/O failure".to_string());
        }
        Self::Csv(err.to_string())
    }
}

/// Classification of the error that ended a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptErrorKind {
    /// The server answered with a challenge page or a blocking status.
    Blocked,
    /// Connection, DNS, relay or timeout failure.
    Transport,
}

impl AttemptErrorKind {
    /// Returns the kind as a short label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Transport => "transport",
        }
    }
}

impl std::fmt::Display for AttemptErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attempt-level failure as recorded by the retry controller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AttemptError {
    /// What kind of failure this was.
    pub kind: AttemptErrorKind,
    /// Human readable message, surfaced as the record's error column.
    pub message: String,
}

impl AttemptError {
    /// Creates a blocked-attempt error.
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            kind: AttemptErrorKind::Blocked,
            message: reason.into(),
        }
    }

    /// Creates a transport-failure error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: AttemptErrorKind::Transport,
            message: message.into(),
        }
    }
}
