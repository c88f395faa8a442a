//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly, validated, and then converted into the
//! application-layer [`AgentConfig`].

mod files;
mod metrics;
mod rate_limit;
mod sandbox;
mod scheduler;
mod workspace;

pub use files::FileFilesConfig;
pub use metrics::FileMetricsConfig;
pub use rate_limit::{FileRateLimitCategory, FileRateLimitConfig};
pub use sandbox::FileSandboxConfig;
pub use scheduler::FileSchedulerConfig;
pub use workspace::FileWorkspaceConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toolbatch_application::AgentConfig;
use toolbatch_domain::DomainError;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("scheduler.max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("files.max_read_bytes cannot be 0")]
    ZeroReadLimit,

    #[error("scheduler.mutating_tools: tool '{0}' needs a non-empty name and path field")]
    InvalidMutatingTool(String),

    #[error("rate_limit.categories.{category}: {reason}")]
    InvalidRateLimit { category: String, reason: String },

    #[error("{0}")]
    InvalidPattern(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Workspace root and virtual-store identity
    pub workspace: FileWorkspaceConfig,
    /// Path allow/deny globs and secret patterns
    pub sandbox: FileSandboxConfig,
    /// Pool size and mutating tools
    pub scheduler: FileSchedulerConfig,
    /// Rate-limited tool categories
    pub rate_limit: FileRateLimitConfig,
    /// Metrics sinks
    pub metrics: FileMetricsConfig,
    /// File executor limits
    pub files: FileFilesConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.scheduler.validate()?;
        self.rate_limit.validate()?;
        if self.files.max_read_bytes == 0 {
            return Err(ConfigValidationError::ZeroReadLimit);
        }
        self.sandbox.to_sandbox_config().build_sandbox()?;
        self.sandbox.to_sandbox_config().build_redactor()?;
        Ok(())
    }

    /// Validate and convert into the configuration executors see.
    pub fn to_agent_config(&self) -> Result<AgentConfig, ConfigValidationError> {
        self.validate()?;
        Ok(AgentConfig::default()
            .with_scheduler(self.scheduler.to_scheduler_config())
            .with_sandbox(self.sandbox.to_sandbox_config())
            .with_rate_limits(self.rate_limit.to_rules())
            .with_max_read_bytes(self.files.max_read_bytes))
    }
}
