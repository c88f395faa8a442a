//! Scheduler parameters: batch concurrency and write classification.

use serde::{Deserialize, Serialize};
use toolbatch_domain::MutatingTools;

/// Default number of work units run at once by `run_batch`.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Scheduler control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of work units executing concurrently.
    pub max_concurrency: usize,
    /// Tools classified as writes, with their target-path field.
    pub mutating_tools: MutatingTools,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            mutating_tools: MutatingTools::new(),
        }
    }
}

impl SchedulerConfig {
    // ==================== Builder Methods ====================

    /// Set the pool size; values below 1 are clamped to 1.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_mutating_tools(mut self, tools: MutatingTools) -> Self {
        self.mutating_tools = tools;
        self
    }

    /// Pool size as used by the scheduler (never zero).
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}
