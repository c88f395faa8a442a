//! Run Tools use case: the tool scheduler.
//!
//! [`ToolScheduler`] executes the tool calls of one model turn:
//!
//! | Step | Check | On failure |
//! |------|-------|------------|
//! | 1 | tool is registered | `Unknown tool: NAME` |
//! | 2 | result already cached | (hit) cached result, nothing else runs |
//! | 3 | input matches schema | joined validation messages |
//! | 4 | rate-limit category has budget | retry-after hint |
//! | 5 | guarded executor runs once per key | error result, still metered |
//!
//! Only step 5 produces a [`MetricRecord`]. Batches (see [`batch`]) run
//! reads and per-path write chains through one bounded pool and return
//! outcomes in submission order.

mod batch;
mod builder;
#[cfg(test)]
mod test_support;

pub use builder::ToolSchedulerBuilder;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use serde_json::Value;
use toolbatch_domain::{
    CacheKey, ExecutorResult, RateLimitRules, ToolCall, ToolFailure, ToolOutcome,
};
use tracing::{debug, info, warn};

use crate::cache::IdempotencyCache;
use crate::config::SchedulerConfig;
use crate::context::{ExecutionContext, StorageBinding};
use crate::ports::input_validator::InputValidator;
use crate::ports::metrics::{MetricRecord, MetricsSink};
use crate::ports::rate_limiter::RateLimiter;
use crate::ports::tool_executor::ToolExecutor;
use crate::tools::ExecutorRegistry;

/// Executes single tool calls and batches against a shared context.
pub struct ToolScheduler {
    registry: ExecutorRegistry,
    context: RwLock<Arc<ExecutionContext>>,
    config: SchedulerConfig,
    rate_limits: RateLimitRules,
    validator: Arc<dyn InputValidator>,
    rate_limiter: Arc<dyn RateLimiter>,
    metrics: Arc<dyn MetricsSink>,
    cache: IdempotencyCache,
}

impl ToolScheduler {
    pub fn builder(registry: ExecutorRegistry, context: ExecutionContext) -> ToolSchedulerBuilder {
        ToolSchedulerBuilder::new(registry, context)
    }

    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn cache(&self) -> &IdempotencyCache {
        &self.cache
    }

    /// Snapshot of the current execution context.
    pub fn context(&self) -> Arc<ExecutionContext> {
        Arc::clone(&self.context.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Route file I/O of subsequent calls through an alternate store.
    ///
    /// Clears the cache: results read from the previous backend do not
    /// describe the new one.
    pub fn attach_storage(&self, binding: StorageBinding) {
        info!(app_id = %binding.app_id, "Attaching workspace storage");
        let mut guard = self.context.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(guard.as_ref().clone().with_storage(binding));
        self.cache.clear();
    }

    /// Return subsequent calls to the real filesystem. Clears the cache.
    pub fn detach_storage(&self) {
        info!("Detaching workspace storage");
        let mut guard = self.context.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(guard.as_ref().clone().without_storage());
        self.cache.clear();
    }

    /// Forget every cached result; call at turn boundaries.
    pub fn clear_cache(&self) {
        debug!(entries = self.cache.len(), "Clearing idempotency cache");
        self.cache.clear();
    }

    /// Execute one call. Never fails: every problem becomes an error outcome.
    pub async fn run_one(&self, call: ToolCall) -> ToolOutcome {
        let ctx = self.context();
        self.execute_call(&call, &ctx).await
    }

    pub(crate) async fn execute_call(&self, call: &ToolCall, ctx: &ExecutionContext) -> ToolOutcome {
        let Some(executor) = self.registry.executor(&call.name) else {
            warn!(tool = %call.name, id = %call.id, "Unknown tool");
            return failure(call, ToolFailure::UnknownTool(call.name.clone()));
        };

        let key = CacheKey::new(&call.name, &call.input);
        if let Some(cached) = self.cache.get(&key) {
            debug!(tool = %call.name, id = %call.id, "Cache hit");
            return cached.to_outcome(&call.id);
        }

        let report = self.validator.validate(&call.name, &call.input);
        if !report.valid {
            debug!(tool = %call.name, errors = ?report.errors, "Validation failed");
            return failure(
                call,
                ToolFailure::ValidationFailed {
                    tool: call.name.clone(),
                    errors: report.errors,
                },
            );
        }

        if let Some(category) = self.rate_limits.category_for(&call.name) {
            let decision = self.rate_limiter.check_limit(category).await;
            if !decision.allowed {
                warn!(
                    tool = %call.name,
                    category,
                    retry_after_secs = decision.retry_after_secs,
                    "Rate limit exceeded"
                );
                return failure(
                    call,
                    ToolFailure::RateLimited {
                        tool: call.name.clone(),
                        category: category.to_string(),
                        retry_after_secs: decision.retry_after_secs,
                    },
                );
            }
        }

        let slot = self.cache.slot(&key);
        let tool_name = call.name.as_str();
        let input = &call.input;
        let result = slot
            .get_or_init(move || self.execute_metered(tool_name, executor, input, ctx))
            .await;
        result.to_outcome(&call.id)
    }

    /// Invoke the executor, converting errors and panics into error results,
    /// and record one metric.
    async fn execute_metered(
        &self,
        tool_name: &str,
        executor: Arc<dyn ToolExecutor>,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> ExecutorResult {
        debug!(tool = tool_name, "Executing tool");
        let started = Instant::now();
        let outcome = AssertUnwindSafe(executor.execute(input, ctx))
            .catch_unwind()
            .await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => ExecutorResult::error(
                ToolFailure::ExecutionFailed {
                    tool: tool_name.to_string(),
                    message: e.to_string(),
                }
                .to_string(),
            ),
            Err(payload) => ExecutorResult::error(
                ToolFailure::ExecutionFailed {
                    tool: tool_name.to_string(),
                    message: format!("panicked: {}", panic_message(payload.as_ref())),
                }
                .to_string(),
            ),
        };

        if result.is_error {
            warn!(tool = tool_name, latency_ms, error = %result.content, "Tool failed");
        } else {
            debug!(tool = tool_name, latency_ms, "Tool completed");
        }

        self.metrics.record(MetricRecord {
            tool: tool_name.to_string(),
            latency_ms,
            input_size: input.to_string().len(),
            output_size: result.content.len(),
            item_count: result.item_count(),
            success: !result.is_error,
            error: result.is_error.then(|| result.content.clone()),
            timestamp: Utc::now(),
        });

        result
    }
}

fn failure(call: &ToolCall, reason: ToolFailure) -> ToolOutcome {
    ToolOutcome::error(&call.id, reason.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
