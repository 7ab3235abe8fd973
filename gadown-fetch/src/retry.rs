//! Retry strategy for report requests.

use std::time::Duration;

/// Linear retry budget: the n-th retry waits `base × (n + 1)`.
///
/// The budget is shared by all pages of one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base delay between retries in seconds.
    pub base_delay_secs: u64,
    /// Maximum delay between retries.
    pub max_delay_secs: u64,
}

impl RetryStrategy {
    /// Creates a linear strategy.
    pub fn linear(max_retries: u32, base_delay_secs: u64) -> Self {
        Self {
            max_retries,
            base_delay_secs,
            max_delay_secs: 600,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::linear(0, 0)
    }

    /// Calculates the delay before the given retry (1-based).
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        let factor = u64::from(retry.max(1)) + 1;
        let delay = self.base_delay_secs.saturating_mul(factor);

        Duration::from_secs(delay.min(self.max_delay_secs))
    }

    /// Returns true if another retry fits the budget after `retries_used`.
    pub fn allows_retry(&self, retries_used: u32) -> bool {
        retries_used < self.max_retries
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::linear(4, 20)
    }
}
