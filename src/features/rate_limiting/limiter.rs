//! Sliding-window request limiter
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Re-keyed from (bot, user) to (persona, client address) for the HTTP gateway
//! - 1.0.0: Initial release with per-user sliding window rate limiting

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Composite key: (persona id, client address).
/// A client talking to different personas gets independent windows.
type LimitKey = (String, String);

#[derive(Clone)]
pub struct RateLimiter {
    requests: DashMap<LimitKey, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: DashMap::new(),
            max_requests,
            time_window,
        }
    }

    fn make_key(persona_id: &str, client: &str) -> LimitKey {
        (persona_id.to_string(), client.to_string())
    }

    /// Record one request attempt. Returns false when the client has
    /// exhausted its window for this persona.
    pub fn check_rate_limit(&self, persona_id: &str, client: &str) -> bool {
        let key = Self::make_key(persona_id, client);
        let now = Instant::now();
        let mut entry = self.requests.entry(key).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }

    /// Time until the oldest recorded request leaves the window, for
    /// logging and the Retry-After header
    pub fn retry_after(&self, persona_id: &str, client: &str) -> Option<Duration> {
        let key = Self::make_key(persona_id, client);
        let entry = self.requests.get(&key)?;
        let oldest = entry.first()?;
        self.time_window.checked_sub(oldest.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const PERSONA: &str = "nova";

    #[test]
    fn test_allows_under_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
    }

    #[test]
    fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(!limiter.check_rate_limit(PERSONA, "10.0.0.1"));
    }

    #[test]
    fn test_resets_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));

        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(!limiter.check_rate_limit(PERSONA, "10.0.0.1"));

        std::thread::sleep(Duration::from_millis(80));
        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
    }

    #[test]
    fn test_limits_are_per_client() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.2"));
        assert!(!limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(!limiter.check_rate_limit(PERSONA, "10.0.0.2"));
    }

    #[test]
    fn test_limits_are_per_persona() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));

        assert!(limiter.check_rate_limit("nova", "10.0.0.1"));
        assert!(!limiter.check_rate_limit("nova", "10.0.0.1"));

        assert!(limiter.check_rate_limit("sage", "10.0.0.1"));
        assert!(!limiter.check_rate_limit("sage", "10.0.0.1"));
    }

    #[test]
    fn test_retry_after_reported_when_blocked() {
        let limiter = RateLimiter::new(1, Duration::from_secs(5));

        assert!(limiter.check_rate_limit(PERSONA, "10.0.0.1"));
        assert!(!limiter.check_rate_limit(PERSONA, "10.0.0.1"));

        let wait = limiter.retry_after(PERSONA, "10.0.0.1").unwrap();
        assert!(wait <= Duration::from_secs(5));
        assert!(wait > Duration::from_secs(3));
    }
}
