//! Token-bucket rate limiter, one bucket per category.
//!
//! ```text
//!  capacity ──▶ ┌─────────┐  refill_per_second tokens flow in,
//!               │ ● ● ●   │  capped at capacity
//!               └────┬────┘
//!                    ▼
//!  check_limit: token available → consume one, allow
//!               bucket empty    → block, retry after ceil(missing / rate) s
//! ```
//!
//! Buckets start full. Categories without a bucket are always allowed.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use toolbatch_application::RateLimiter;
use toolbatch_domain::RateLimitDecision;
use tracing::debug;

/// Burst size and sustained rate of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub capacity: u32,
    pub refill_per_second: f64,
}

impl BucketConfig {
    pub fn new(capacity: u32, refill_per_second: f64) -> Self {
        Self {
            capacity,
            refill_per_second,
        }
    }
}

#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    refill_rate: f64,
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(config: BucketConfig) -> Self {
        Self {
            capacity: f64::from(config.capacity),
            refill_rate: config.refill_per_second,
            tokens: f64::from(config.capacity),
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    /// Consume one token, or return the seconds until one is available.
    fn try_acquire(&mut self, now: Instant) -> Result<(), u64> {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return Ok(());
        }
        let missing = 1.0 - self.tokens;
        let wait = (missing / self.refill_rate).ceil();
        // Saturating cast: a zero refill rate yields u64::MAX.
        Err((wait as u64).max(1))
    }
}

#[derive(Debug, Default)]
pub struct TokenBucketRateLimiter {
    buckets: HashMap<String, Mutex<TokenBucket>>,
}

impl TokenBucketRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>, config: BucketConfig) -> Self {
        self.buckets
            .insert(category.into(), Mutex::new(TokenBucket::new(config)));
        self
    }

    fn check_at(&self, category: &str, now: Instant) -> RateLimitDecision {
        let Some(bucket) = self.buckets.get(category) else {
            return RateLimitDecision::allow();
        };
        let mut bucket = bucket.lock().unwrap_or_else(PoisonError::into_inner);
        match bucket.try_acquire(now) {
            Ok(()) => RateLimitDecision::allow(),
            Err(retry_after_secs) => {
                debug!(category, retry_after_secs, "Token bucket empty");
                RateLimitDecision::blocked(retry_after_secs)
            }
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucketRateLimiter {
    async fn check_limit(&self, category: &str) -> RateLimitDecision {
        self.check_at(category, Instant::now())
    }
}
