//! Fixed-window rate limiter middleware.
//!
//! Allows up to a configured number of requests per wall-clock second across
//! all clients. Applied to the chat routes only.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Extension, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Shared state for the rate limiter.
///
/// The window (low 32 bits of the epoch second) and the number of requests
/// admitted in it share one atomic word, so every admission is a single
/// compare-and-swap.
#[derive(Clone)]
pub struct RateLimiter {
    max_per_sec: u32,
    state: Arc<AtomicU64>,
}

fn pack(window: u32, count: u32) -> u64 {
    (u64::from(window) << 32) | u64::from(count)
}

fn unpack(state: u64) -> (u32, u32) {
    ((state >> 32) as u32, state as u32)
}

impl RateLimiter {
    /// `max_per_sec == 0` disables limiting.
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec: u32::try_from(max_per_sec).unwrap_or(u32::MAX),
            state: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Admit or reject one request.
    pub fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now as u32)
    }

    fn try_acquire_at(&self, now: u32) -> bool {
        if self.max_per_sec == 0 {
            return true;
        }

        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let (window, count) = unpack(current);
            let next = if window != now {
                pack(now, 1)
            } else if count < self.max_per_sec {
                pack(window, count + 1)
            } else {
                return false;
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Axum middleware that enforces the rate limit.
pub async fn rate_limit_middleware(
    Extension(limiter): Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        next.run(req).await
    } else {
        tracing::debug!("Chat request rejected by rate limiter");
        ApiError::TooManyRequests.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_limit_within_window() {
        let limiter = RateLimiter::new(3);
        assert!(limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(100));
        assert!(!limiter.try_acquire_at(100));
    }

    #[test]
    fn test_new_window_resets() {
        let limiter = RateLimiter::new(1);
        assert!(limiter.try_acquire_at(100));
        assert!(!limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(101));
        assert!(!limiter.try_acquire_at(101));
    }

    #[test]
    fn test_concurrent_requests_across_window_change() {
        let limiter = RateLimiter::new(50);
        // Fill window 100 so every thread below sees a stale window first.
        for _ in 0..50 {
            assert!(limiter.try_acquire_at(100));
        }

        let admitted = AtomicU64::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        if limiter.try_acquire_at(101) {
                            admitted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(admitted.load(Ordering::Relaxed), 50);
        assert!(!limiter.try_acquire_at(101));
    }

    #[test]
    fn test_zero_disables_limit() {
        let limiter = RateLimiter::new(0);
        for _ in 0..1_000 {
            assert!(limiter.try_acquire_at(100));
        }
    }
}
