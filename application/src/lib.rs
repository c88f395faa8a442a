//! Application layer for toolbatch
//!
//! This crate contains the port definitions, the execution context, the
//! executor registry and the tool scheduler. It depends only on the domain
//! layer.

pub mod cache;
pub mod config;
pub mod context;
pub mod ports;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use cache::IdempotencyCache;
pub use config::{AgentConfig, SandboxConfig, SchedulerConfig};
pub use context::{ExecutionContext, StorageBinding};
pub use ports::{
    input_validator::{AcceptAllInput, InputValidator},
    metrics::{MetricRecord, MetricsSink, NoMetrics},
    rate_limiter::{NoRateLimit, RateLimiter},
    tool_executor::{ExecutorError, ToolExecutor},
    tool_schema::ToolSchemaPort,
    workspace_store::{StoreError, WorkspaceStore},
};
pub use tools::{ExecutorRegistry, PathGuard, SchemaValidator};
pub use use_cases::run_tools::{ToolScheduler, ToolSchedulerBuilder};
