use crate::utils::RateLimitConfig;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Fixed-window request quota.
///
/// The window is only examined when a request is about to be issued; there is
/// no background reset. Owned by a single caller through `&mut self`; sharing
/// it across workers would need a mutex around this state.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: usize,
    window: Duration,
    count: usize,
    window_start: Instant,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            count: 0,
            window_start: Instant::now(),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Accounts for one request, sleeping until the current window ends when
    /// the quota is already used up.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();

        if self.count >= self.max_requests && elapsed < self.window {
            let wait = self.window - elapsed;
            info!(
                wait_secs = wait.as_secs_f64(),
                quota = self.max_requests,
                "Rate limit reached, waiting for window to elapse"
            );
            tokio::time::sleep(wait).await;
            self.restart_window();
        } else if elapsed >= self.window {
            self.restart_window();
        } else {
            self.count += 1;
        }
    }

    fn restart_window(&mut self) {
        self.count = 1;
        self.window_start = Instant::now();
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn quota_calls_proceed_without_waiting() {
        let mut limiter = FixedWindowLimiter::new(100, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..100 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.count(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn call_past_quota_blocks_until_window_elapses() {
        let mut limiter = FixedWindowLimiter::new(100, Duration::from_secs(60));
        let start = Instant::now();
        for _ in 0..100 {
            limiter.acquire().await;
        }
        tokio::time::advance(Duration::from_secs(20)).await;

        limiter.acquire().await;

        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(60), "waited {:?}", waited);
        assert!(waited < Duration::from_secs(61), "waited {:?}", waited);
        assert_eq!(limiter.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_window_resets_without_waiting() {
        let mut limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        for _ in 0..2 {
            limiter.acquire().await;
        }
        tokio::time::advance(Duration::from_secs(61)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(limiter.count(), 1);

        // Fresh window: two more calls fit before the quota of three.
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(limiter.count(), 3);
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
