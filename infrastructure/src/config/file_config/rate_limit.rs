//! Rate-limit configuration from TOML (`[rate_limit]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toolbatch_domain::RateLimitRules;

use super::ConfigValidationError;
use crate::rate_limit::{BucketConfig, TokenBucketRateLimiter};

/// One rate-limited category.
///
/// # Example
///
/// ```toml
/// [rate_limit.categories.search]
/// prefixes = ["web_search"]
/// capacity = 10            # burst size
/// refill_per_second = 0.5  # sustained rate
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitCategory {
    pub prefixes: Vec<String>,
    pub capacity: u32,
    pub refill_per_second: f64,
}

impl Default for FileRateLimitCategory {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            capacity: 10,
            refill_per_second: 1.0,
        }
    }
}

/// Raw rate-limit configuration; no categories by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitConfig {
    pub categories: BTreeMap<String, FileRateLimitCategory>,
}

impl FileRateLimitConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (category, settings) in &self.categories {
            let reason = if settings.prefixes.iter().all(|p| p.trim().is_empty()) {
                Some("at least one non-empty prefix is required")
            } else if settings.capacity == 0 {
                Some("capacity must be at least 1")
            } else if !(settings.refill_per_second > 0.0 && settings.refill_per_second.is_finite())
            {
                Some("refill_per_second must be a positive number")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigValidationError::InvalidRateLimit {
                    category: category.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn to_rules(&self) -> RateLimitRules {
        self.categories
            .iter()
            .fold(RateLimitRules::new(), |rules, (category, settings)| {
                rules.with_category(category.clone(), settings.prefixes.iter().cloned())
            })
    }

    pub fn to_limiter(&self) -> TokenBucketRateLimiter {
        self.categories
            .iter()
            .fold(TokenBucketRateLimiter::new(), |limiter, (category, settings)| {
                limiter.with_category(
                    category.clone(),
                    BucketConfig::new(settings.capacity, settings.refill_per_second),
                )
            })
    }
}
