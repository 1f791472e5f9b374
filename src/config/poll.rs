//! Polling configuration.

use std::time::Duration;

/// How the workflow polls for an uploaded scan's completion.
///
/// The default polls back-to-back with no cap: the loop ends only when the
/// service reports 100% progress or a request fails. Both knobs exist so a
/// caller can opt into a bound; neither is applied unless set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between consecutive poll requests.
    pub interval: Duration,

    /// Maximum number of poll requests, or `None` for no limit.
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl PollConfig {
    /// Polls with no delay and no cap.
    pub fn unbounded() -> Self {
        Self {
            interval: Duration::ZERO,
            max_attempts: None,
        }
    }

    /// Sets the delay between polls.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Caps the number of poll requests. Zero is bumped to one.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// Returns the delay to wait before the given poll (0-indexed).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            self.interval
        }
    }

    /// Returns whether another poll may be issued after `attempts` polls.
    pub fn allows(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }

    /// Returns `true` if no cap is configured.
    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded_busy_poll() {
        let config = PollConfig::default();
        assert!(config.is_unbounded());
        assert_eq!(config.interval, Duration::ZERO);
        assert!(config.allows(u32::MAX - 1));
    }

    #[test]
    fn test_first_poll_is_immediate() {
        let config = PollConfig::unbounded().with_interval(Duration::from_millis(250));
        assert_eq!(config.delay_before(0), Duration::ZERO);
        assert_eq!(config.delay_before(1), Duration::from_millis(250));
        assert_eq!(config.delay_before(7), Duration::from_millis(250));
    }

    #[test]
    fn test_max_attempts() {
        let config = PollConfig::unbounded().with_max_attempts(3);
        assert!(config.allows(0));
        assert!(config.allows(2));
        assert!(!config.allows(3));
    }

    #[test]
    fn test_saturated_attempt_counter() {
        // The poll loop's counter sticks at u32::MAX instead of wrapping to 0.
        let saturated = u32::MAX.saturating_add(1);
        assert_eq!(saturated, u32::MAX);
        assert!(PollConfig::unbounded().allows(saturated));
        assert!(!PollConfig::unbounded().with_max_attempts(u32::MAX).allows(saturated));
    }

    #[test]
    fn test_zero_attempts_bumped() {
        let config = PollConfig::unbounded().with_max_attempts(0);
        assert_eq!(config.max_attempts, Some(1));
    }
}
