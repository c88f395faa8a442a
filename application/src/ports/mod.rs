//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod input_validator;
pub mod metrics;
pub mod rate_limiter;
pub mod tool_executor;
pub mod tool_schema;
pub mod workspace_store;
