use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Keeps a minimum gap between consecutive requests to the same host
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining() {
            sleep(remaining).await;
        }
        self.mark();
    }

    /// Time still to wait before the next request may go out
    pub fn remaining(&self) -> Option<Duration> {
        let elapsed = self.last_request?.elapsed();
        self.delay.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    fn mark(&mut self) {
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_is_not_delayed() {
        let limiter = RateLimiter::new(60_000);
        assert!(limiter.remaining().is_none());
    }

    #[tokio::test]
    async fn test_second_request_has_to_wait() {
        let mut limiter = RateLimiter::new(60_000);
        limiter.wait().await;
        assert!(limiter.remaining().is_some());
    }

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let mut limiter = RateLimiter::new(0);
        limiter.wait().await;
        assert!(limiter.remaining().is_none());
    }
}
