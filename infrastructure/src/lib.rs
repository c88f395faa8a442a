//! Infrastructure layer for toolbatch
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the reference file tools, the in-memory
//! workspace store, token-bucket rate limiting, metrics sinks and
//! configuration file loading.

pub mod config;
pub mod metrics;
pub mod rate_limit;
pub mod storage;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use metrics::{FanoutMetricsSink, JsonlMetricsSink, TracingMetricsSink};
pub use rate_limit::{BucketConfig, TokenBucketRateLimiter};
pub use storage::InMemoryWorkspace;
pub use tools::{
    JsonSchemaToolConverter, PatchLinesExecutor, ReadFileExecutor, SearchFilesExecutor,
    WriteFileExecutor, default_mutating_tools, default_registry, default_tool_spec,
};
