//! Response classification.

use std::collections::HashSet;

use super::protocols::FetchOutcome;
use crate::config::HarvestConfig;

/// Reason recorded when a challenge marker is found in the body.
pub const CHALLENGE_REASON: &str = "Captcha detected";

/// What counts as soft blocking.
#[derive(Debug, Clone)]
pub struct BlockPolicy {
    blocked_statuses: HashSet<u16>,
    markers: Vec<String>,
}

impl BlockPolicy {
    /// Creates a policy from explicit statuses and markers.
    #[must_use]
    pub fn new(blocked_statuses: HashSet<u16>, markers: &[String]) -> Self {
        Self {
            blocked_statuses,
            markers: markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Builds the policy described by a harvest config.
    #[must_use]
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(config.blocked_status_codes.clone(), &config.challenge_markers)
    }

    /// Whether the status alone marks the response as blocked.
    #[must_use]
    pub fn is_blocked_status(&self, status: u16) -> bool {
        self.blocked_statuses.contains(&status)
    }

    /// Whether the body carries a challenge marker.
    #[must_use]
    pub fn has_challenge_marker(&self, body: &str) -> bool {
        if self.markers.is_empty() {
            return false;
        }
        let lowered = body.to_lowercase();
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self::from_config(&HarvestConfig::default())
    }
}

/// Classifies a received response.
///
/// A blocking status wins over the body check; anything else is a page.
#[must_use]
pub fn classify_response(policy: &BlockPolicy, status: u16, body: String) -> FetchOutcome {
    if policy.is_blocked_status(status) {
        let reason = if status == 503 {
            "Service unavailable (503)".to_string()
        } else {
            format!("Blocked with status {status}")
        };
        return FetchOutcome::blocked(reason);
    }
    if policy.has_challenge_marker(&body) {
        return FetchOutcome::blocked(CHALLENGE_REASON);
    }
    FetchOutcome::ok(body, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ok_page() {
        let policy = BlockPolicy::default();
        let outcome = classify_response(&policy, 200, "<span id=\"productTitle\">Kettle</span>".into());
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_service_unavailable_is_blocked() {
        let policy = BlockPolicy::default();
        let outcome = classify_response(&policy, 503, "<html>Sorry</html>".into());
        assert_eq!(outcome, FetchOutcome::blocked("Service unavailable (503)"));
    }

    #[test]
    fn test_challenge_marker_case_insensitive() {
        let policy = BlockPolicy::default();
        let body = "<form action=\"/errors/validateCaptcha\">Type the characters</form>";
        let outcome = classify_response(&policy, 200, body.into());
        assert_eq!(outcome, FetchOutcome::blocked(CHALLENGE_REASON));
    }

    #[test]
    fn test_other_statuses_pass_through() {
        let policy = BlockPolicy::default();
        let outcome = classify_response(&policy, 404, "not here".into());
        assert_eq!(outcome, FetchOutcome::ok("not here", 404));
    }

    #[test]
    fn test_custom_policy() {
        let policy = BlockPolicy::new([429].into_iter().collect(), &["robot check".to_string()]);
        assert!(classify_response(&policy, 503, String::new()).is_ok());
        assert_eq!(
            classify_response(&policy, 429, String::new()),
            FetchOutcome::blocked("Blocked with status 429")
        );
        assert_eq!(
            classify_response(&policy, 200, "ROBOT CHECK".into()),
            FetchOutcome::blocked(CHALLENGE_REASON)
        );
    }
}
