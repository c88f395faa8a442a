//! Full agent configuration handed to executors through the context.

use serde::{Deserialize, Serialize};
use toolbatch_domain::{DomainError, RateLimitRules};

use super::{SandboxConfig, SchedulerConfig};

/// Largest file `read_file` returns before refusing (10 MiB).
pub const DEFAULT_MAX_READ_BYTES: u64 = 10 * 1024 * 1024;

/// Everything an executor may consult while running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub scheduler: SchedulerConfig,
    pub sandbox: SandboxConfig,
    pub rate_limits: RateLimitRules,
    pub max_read_bytes: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            sandbox: SandboxConfig::default(),
            rate_limits: RateLimitRules::default(),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
        }
    }
}

impl AgentConfig {
    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_sandbox(mut self, sandbox: SandboxConfig) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_rate_limits(mut self, rules: RateLimitRules) -> Self {
        self.rate_limits = rules;
        self
    }

    pub fn with_max_read_bytes(mut self, bytes: u64) -> Self {
        self.max_read_bytes = bytes;
        self
    }

    /// Compile every glob and secret pattern once to surface mistakes early.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.sandbox.build_sandbox()?;
        self.sandbox.build_redactor()?;
        if self.max_read_bytes == 0 {
            return Err(DomainError::InvalidConfig(
                "max_read_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
