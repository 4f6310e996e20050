//! Retry state and backoff window.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::config::HarvestConfig;
use crate::core::AttemptState;
use crate::errors::{AttemptError, AttemptErrorKind};

/// Mutable bookkeeping for one identifier's attempts.
///
/// Owned by a single controller run and dropped with its record.
#[derive(Debug)]
pub struct RetryState {
    /// Failed attempts so far.
    pub attempts_used: u32,
    /// Message of the most recent failure; empty until one happens.
    pub last_error: String,
    started_at: Instant,
    state: AttemptState,
}

impl RetryState {
    /// Creates a pending state with the clock started.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts_used: 0,
            last_error: String::new(),
            started_at: Instant::now(),
            state: AttemptState::Pending,
        }
    }

    /// Enters `Attempting` and returns the 1-based attempt number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.state = AttemptState::Attempting;
        self.attempts_used + 1
    }

    /// Records a failed attempt and moves to the matching retry state, or
    /// to `Failed` once `max_retries` attempts have been used.
    pub fn record_failure(&mut self, error: &AttemptError, max_retries: u32) -> AttemptState {
        self.attempts_used += 1;
        self.last_error.clone_from(&error.message);
        self.state = if self.attempts_used >= max_retries {
            AttemptState::Failed
        } else {
            match error.kind {
                AttemptErrorKind::Blocked => AttemptState::BlockedRetry,
                AttemptErrorKind::Transport => AttemptState::TransportRetry,
            }
        };
        self.state
    }

    /// Marks the identifier as succeeded.
    pub fn succeed(&mut self) {
        self.state = AttemptState::Succeeded;
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform random pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffWindow {
    min_ms: u64,
    max_ms: u64,
}

impl BackoffWindow {
    /// Creates a window; bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// A window that never pauses.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Builds the window from a harvest config.
    #[must_use]
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(config.backoff_min_ms, config.backoff_max_ms)
    }

    /// Draws a pause.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}

impl Default for BackoffWindow {
    fn default() -> Self {
        Self::from_config(&HarvestConfig::default())
    }
}

/// Random source for one controller run.
///
/// With a seed, each submission index gets its own reproducible stream so
/// results do not depend on which worker picks the identifier up.
#[must_use]
pub fn rng_for(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => {
            let mixed = seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            StdRng::seed_from_u64(mixed)
        }
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_pending() {
        let state = RetryState::new();
        assert_eq!(state.attempts_used, 0);
        assert_eq!(state.last_error, "");
        assert_eq!(state.state, AttemptState::Pending);
    }

    #[test]
    fn test_failures_progress_to_failed() {
        let mut state = RetryState::new();

        assert_eq!(state.begin_attempt(), 1);
        let next = state.record_failure(&AttemptError::blocked("Captcha detected"), 3);
        assert_eq!(next, AttemptState::BlockedRetry);

        assert_eq!(state.begin_attempt(), 2);
        let next = state.record_failure(&AttemptError::transport("reset by peer"), 3);
        assert_eq!(next, AttemptState::TransportRetry);

        assert_eq!(state.begin_attempt(), 3);
        let next = state.record_failure(&AttemptError::transport("timed out"), 3);
        assert_eq!(next, AttemptState::Failed);
        assert_eq!(state.attempts_used, 3);
        assert_eq!(state.last_error, "timed out");
        assert_eq!(state.state, AttemptState::Failed);
    }

    #[test]
    fn test_single_attempt_budget() {
        let mut state = RetryState::new();
        state.begin_attempt();
        assert_eq!(
            state.record_failure(&AttemptError::blocked("x"), 1),
            AttemptState::Failed
        );
    }

    #[test]
    fn test_backoff_window_bounds() {
        let window = BackoffWindow::new(1000, 4000);
        let mut rng = rng_for(Some(5), 0);
        for _ in 0..100 {
            let d = window.sample(&mut rng);
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(4000));
        }
    }

    #[test]
    fn test_backoff_window_degenerate() {
        let mut rng = rng_for(Some(1), 0);
        assert_eq!(BackoffWindow::none().sample(&mut rng), Duration::ZERO);
        assert_eq!(BackoffWindow::new(50, 50).sample(&mut rng), Duration::from_millis(50));
        assert_eq!(BackoffWindow::new(9, 3), BackoffWindow::new(3, 9));
    }

    #[test]
    fn test_seeded_rng_reproducible_per_index() {
        let a: Vec<u32> = (0..5).map({
            let mut rng = rng_for(Some(11), 3);
            move |_| rng.gen()
        }).collect();
        let b: Vec<u32> = (0..5).map({
            let mut rng = rng_for(Some(11), 3);
            move |_| rng.gen()
        }).collect();
        let c: Vec<u32> = (0..5).map({
            let mut rng = rng_for(Some(11), 4);
            move |_| rng.gen()
        }).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
