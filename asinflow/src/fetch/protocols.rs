//! Protocol types for fetching.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::AttemptError;

/// Everything needed to issue one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Product identifier the page belongs to.
    pub identifier: String,
    /// Absolute page URL.
    pub url: String,
    /// Client identity sent as `User-Agent`.
    pub identity: String,
    /// Relay endpoint (`host:port`), `None` for a direct connection.
    pub relay: Option<String>,
    /// Hard upper bound on the whole call.
    pub timeout: Duration,
}

/// Classified result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A normal page came back.
    Ok {
        /// Raw response body.
        markup: String,
        /// HTTP status code.
        status: u16,
    },
    /// The server intervened (challenge page or blocking status).
    Blocked {
        /// Why the response was judged blocked.
        reason: String,
    },
    /// The request never produced a usable response.
    TransportFailure {
        /// Underlying error text.
        message: String,
    },
}

impl FetchOutcome {
    /// Creates an `Ok` outcome.
    #[must_use]
    pub fn ok(markup: impl Into<String>, status: u16) -> Self {
        Self::Ok {
            markup: markup.into(),
            status,
        }
    }

    /// Creates a `Blocked` outcome.
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    /// Creates a `TransportFailure` outcome.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
        }
    }

    /// Whether this outcome carries a page.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Converts the failure variants into an [`AttemptError`].
    pub fn into_result(self) -> Result<(String, u16), AttemptError> {
        match self {
            Self::Ok { markup, status } => Ok((markup, status)),
            Self::Blocked { reason } => Err(AttemptError::blocked(reason)),
            Self::TransportFailure { message } => Err(AttemptError::transport(message)),
        }
    }
}

/// Protocol for issuing one page request.
///
/// Implementations perform exactly one network call and never retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the page described by `request`.
    async fn fetch(&self, request: &FetchRequest) -> FetchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AttemptErrorKind;

    #[test]
    fn test_outcome_into_result() {
        let ok = FetchOutcome::ok("<html></html>", 200).into_result();
        assert_eq!(ok, Ok(("<html></html>".to_string(), 200)));

        let blocked = FetchOutcome::blocked("Captcha detected").into_result();
        assert!(matches!(blocked, Err(ref e) if e.kind == AttemptErrorKind::Blocked));

        let transport = FetchOutcome::transport("dns error").into_result();
        assert!(matches!(transport, Err(ref e) if e.kind == AttemptErrorKind::Transport && e.message == "dns error"));
    }

    #[test]
    fn test_is_ok() {
        assert!(FetchOutcome::ok("", 200).is_ok());
        assert!(!FetchOutcome::blocked("x").is_ok());
        assert!(!FetchOutcome::transport("x").is_ok());
    }
}
