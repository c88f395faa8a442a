//! Builder for [`ToolScheduler`].

use std::sync::{Arc, RwLock};

use toolbatch_domain::RateLimitRules;

use super::ToolScheduler;
use crate::cache::IdempotencyCache;
use crate::config::SchedulerConfig;
use crate::context::ExecutionContext;
use crate::ports::input_validator::InputValidator;
use crate::ports::metrics::{MetricsSink, NoMetrics};
use crate::ports::rate_limiter::{NoRateLimit, RateLimiter};
use crate::tools::{ExecutorRegistry, SchemaValidator};

/// Collects the scheduler's collaborators.
///
/// Only the registry and the context are required. Unset parts default to:
/// scheduler settings and rate-limit rules from the context's config, a
/// [`SchemaValidator`] over the registry, no rate limiting, no metrics and
/// a fresh cache.
///
/// Scheduler settings and rate-limit rules given here are written back
/// into the context's config, so batch classification and the registry's
/// path guard always see the same mutating set.
pub struct ToolSchedulerBuilder {
    registry: ExecutorRegistry,
    context: ExecutionContext,
    config: Option<SchedulerConfig>,
    rate_limits: Option<RateLimitRules>,
    validator: Option<Arc<dyn InputValidator>>,
    rate_limiter: Arc<dyn RateLimiter>,
    metrics: Arc<dyn MetricsSink>,
    cache: IdempotencyCache,
}

impl ToolSchedulerBuilder {
    pub(super) fn new(registry: ExecutorRegistry, context: ExecutionContext) -> Self {
        Self {
            registry,
            context,
            config: None,
            rate_limits: None,
            validator: None,
            rate_limiter: Arc::new(NoRateLimit),
            metrics: Arc::new(NoMetrics),
            cache: IdempotencyCache::new(),
        }
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn rate_limits(mut self, rules: RateLimitRules) -> Self {
        self.rate_limits = Some(rules);
        self
    }

    pub fn validator(mut self, validator: Arc<dyn InputValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    pub fn metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics = sink;
        self
    }

    pub fn cache(mut self, cache: IdempotencyCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn build(self) -> ToolScheduler {
        let config = self
            .config
            .unwrap_or_else(|| self.context.config().scheduler.clone());
        let config = SchedulerConfig {
            max_concurrency: config.effective_concurrency(),
            ..config
        };
        let rate_limits = self
            .rate_limits
            .unwrap_or_else(|| self.context.config().rate_limits.clone());
        let validator = self
            .validator
            .unwrap_or_else(|| Arc::new(SchemaValidator::new(self.registry.spec())));

        let context = self
            .context
            .with_scheduler_config(config.clone())
            .with_rate_limits(rate_limits.clone());

        ToolScheduler {
            registry: self.registry,
            context: RwLock::new(Arc::new(context)),
            config,
            rate_limits,
            validator,
            rate_limiter: self.rate_limiter,
            metrics: self.metrics,
            cache: self.cache,
        }
    }
}
