//! Rate-limit categories derived from tool-name prefixes.
//!
//! Tools that call metered external services share a throttle per
//! category, e.g. every `web_search*` tool counts against `search`.
//! The throttle's accounting lives behind the application-layer
//! `RateLimiter` port; this module only decides which category applies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name → tool-name prefixes belonging to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRules {
    categories: BTreeMap<String, Vec<String>>,
}

impl RateLimitRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category<I, S>(mut self, category: impl Into<String>, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .entry(category.into())
            .or_default()
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Category of a tool; the longest matching prefix wins.
    pub fn category_for(&self, tool_name: &str) -> Option<&str> {
        self.categories
            .iter()
            .flat_map(|(category, prefixes)| {
                prefixes
                    .iter()
                    .filter(move |p| !p.is_empty() && tool_name.starts_with(p.as_str()))
                    .map(move |p| (p.len(), category.as_str()))
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, category)| category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Answer of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub retry_after_secs: u64,
}

impl RateLimitDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_secs: 0,
        }
    }

    pub fn blocked(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs,
        }
    }
}
