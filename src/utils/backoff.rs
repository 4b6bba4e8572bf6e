use std::time::Duration;

use crate::constants::{
    DEFAULT_CONFIRMATION_INITIAL_BACKOFF_MS, DEFAULT_CONFIRMATION_MAX_ATTEMPTS,
    DEFAULT_CONFIRMATION_MAX_BACKOFF_MS,
};

/// Capped exponential backoff with an attempt ceiling.
///
/// The delay after attempt `n` (1-based) is
/// `min(initial_backoff * multiplier^(n-1), max_backoff)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
    pub max_backoff: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_CONFIRMATION_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_CONFIRMATION_INITIAL_BACKOFF_MS),
            multiplier: 2,
            max_backoff: Duration::from_millis(DEFAULT_CONFIRMATION_MAX_BACKOFF_MS),
        }
    }
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            ..Self::default()
        }
    }

    /// Delay to wait after the given attempt. Saturates at `max_backoff`.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        self.multiplier
            .checked_pow(exponent)
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .map_or(self.max_backoff, |delay| delay.min(self.max_backoff))
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn should_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }

    /// Sum of every delay a run that never succeeds would sleep.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.backoff_duration(attempt))
            .sum()
    }
}
