//! Rate limiter port.
//!
//! The scheduler asks the limiter once per call whose tool belongs to a
//! rate-limited category. Token accounting is the adapter's concern.

use async_trait::async_trait;
use toolbatch_domain::RateLimitDecision;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one unit of `category`'s budget, or report when to retry.
    async fn check_limit(&self, category: &str) -> RateLimitDecision;
}

/// No-op implementation for tests and when rate limiting is disabled.
pub struct NoRateLimit;

#[async_trait]
impl RateLimiter for NoRateLimit {
    async fn check_limit(&self, _category: &str) -> RateLimitDecision {
        RateLimitDecision::allow()
    }
}
