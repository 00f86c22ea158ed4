use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Enforces a maximum number of admissions per rolling one-second window.
///
/// The admission check and the recording of the new timestamp happen under a
/// single lock acquisition, so two concurrent callers cannot both observe
/// room under the limit. The lock is never held across an await.
pub struct RateLimiter {
    limit: usize,
    window: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1) as usize,
            window: Mutex::new(VecDeque::new()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Wait until one more request fits under the limit, then record it.
    ///
    /// Bounded loop: each pass either admits, or sleeps until the oldest
    /// recorded admission leaves the window and is evicted on the next pass.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut window = self.window.lock().unwrap();
                let now = Instant::now();

                while let Some(oldest) = window.front() {
                    if now.duration_since(*oldest) >= WINDOW {
                        window.pop_front();
                    } else {
                        break;
                    }
                }

                if window.len() < self.limit {
                    window.push_back(now);
                    return;
                }

                // Window is full; wait until the oldest entry expires
                let oldest = *window.front().expect("window is non-empty");
                WINDOW.saturating_sub(now.duration_since(oldest))
            };

            if wait.is_zero() {
                continue;
            }
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_admissions_under_limit_are_immediate() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();

        for _ in 0..5 {
            limiter.admit().await;
        }

        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_admission_over_limit_waits_for_window() {
        let limiter = RateLimiter::new(2);
        let start = Instant::now();

        limiter.admit().await;
        limiter.admit().await;
        // Third admission must wait until the first leaves the 1s window
        limiter.admit().await;

        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_more_than_limit_in_any_window() {
        let limiter = RateLimiter::new(3);
        let mut admissions = Vec::new();

        for _ in 0..9 {
            limiter.admit().await;
            admissions.push(Instant::now());
        }

        for (i, first) in admissions.iter().enumerate() {
            let in_window = admissions[i..]
                .iter()
                .take_while(|t| t.duration_since(*first) < WINDOW)
                .count();
            assert!(in_window <= 3, "window starting at admission {} held {}", i, in_window);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_after_idle_period() {
        let limiter = RateLimiter::new(2);
        limiter.admit().await;
        limiter.admit().await;

        sleep(Duration::from_millis(1100)).await;

        let start = Instant::now();
        limiter.admit().await;
        limiter.admit().await;
        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_respect_limit() {
        let limiter = Arc::new(RateLimiter::new(2));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.admit().await;
                Instant::now()
            }));
        }

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap());
        }
        times.sort();

        // Four admissions at limit 2 need at least one full window of waiting
        assert!(times[3].duration_since(start) >= Duration::from_secs(1));
        // No window of 1s may contain more than 2 admissions
        for (i, first) in times.iter().enumerate() {
            let in_window = times[i..]
                .iter()
                .take_while(|t| t.duration_since(*first) < WINDOW)
                .count();
            assert!(in_window <= 2);
        }
    }

    #[test]
    fn test_zero_limit_is_clamped_to_one() {
        let limiter = RateLimiter::new(0);
        assert_eq!(limiter.limit(), 1);
    }
}
