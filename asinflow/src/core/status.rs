//! Record status and retry state enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// The page was fetched and extracted.
    Success,
    /// Every attempt failed.
    Failed,
}

impl RecordStatus {
    /// Returns the status label used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States of the per-identifier retry state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    /// Not yet attempted.
    Pending,
    /// A fetch is in flight.
    Attempting,
    /// The last attempt was blocked; another follows after a pause.
    BlockedRetry,
    /// The last attempt hit a transport error; another follows after a pause.
    TransportRetry,
    /// A page was fetched and extracted.
    Succeeded,
    /// The attempt budget is spent.
    Failed,
}

impl AttemptState {
    /// Returns true for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl Default for AttemptState {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Attempting => write!(f, "attempting"),
            Self::BlockedRetry => write!(f, "blocked_retry"),
            Self::TransportRetry => write!(f, "transport_retry"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
