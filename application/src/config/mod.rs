//! Application-level configuration.
//!
//! This module provides the configuration types handed to the scheduler and
//! its executors:
//!
//! - [`SchedulerConfig`]: pool size and the closed set of mutating tools
//! - [`SandboxConfig`]: path allow/deny globs and secret patterns
//! - [`AgentConfig`]: the full configuration visible to executors

pub mod agent_config;
pub mod sandbox_config;
pub mod scheduler_config;

pub use agent_config::{AgentConfig, DEFAULT_MAX_READ_BYTES};
pub use sandbox_config::SandboxConfig;
pub use scheduler_config::{DEFAULT_MAX_CONCURRENCY, SchedulerConfig};
