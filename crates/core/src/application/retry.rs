// Delivery retry policy
//
// Bounded attempts with a linearly increasing delay between them
// (retry_n * base_delay: 1s, 2s, ...). The base delay is injectable so tests
// run the loop without real sleeps.

use std::time::Duration;
use tracing::warn;

/// Retry policy for transport send attempts
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// # Arguments
    /// * `max_attempts` - Total send attempts, including the first (default: 3)
    /// * `base_delay` - Unit of the linear backoff schedule
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay preceding the given retry (1-based: first retry waits one unit,
    /// second retry two units, ...)
    pub fn delay_for(&self, retry_n: u32) -> Duration {
        self.base_delay * retry_n
    }

    /// True when another attempt is allowed after `attempts` tries
    pub fn attempts_remaining(&self, attempts: u32) -> bool {
        if attempts >= self.max_attempts {
            warn!(
                attempts,
                max_attempts = self.max_attempts,
                "Max send attempts reached"
            );
            return false;
        }
        true
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            super::delivery::constants::DEFAULT_MAX_SEND_ATTEMPTS,
            super::delivery::constants::DEFAULT_RETRY_BASE_DELAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_increases_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(3));
    }

    #[test]
    fn test_attempts_are_bounded() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        assert!(policy.attempts_remaining(0));
        assert!(policy.attempts_remaining(2));
        assert!(!policy.attempts_remaining(3));
        assert!(!policy.attempts_remaining(4));
    }
}
