//! Domain layer for toolbatch
//!
//! This crate contains the pure types and rules behind the tool-execution
//! scheduler. It performs no I/O and has no dependencies on the
//! application, infrastructure or CLI crates.
//!
//! # Core Concepts
//!
//! ## Tool batches
//!
//! A model turn produces a batch of [`ToolCall`]s. Each call is answered by
//! exactly one [`ToolOutcome`], returned in the order the calls were made.
//!
//! ## Read / write classification
//!
//! Calls to tools in the closed [`MutatingTools`] set are writes, grouped by
//! target path into [`WriteGroup`]s that serialize against each other.
//!
//! ## Sandbox
//!
//! [`PathSandbox`] evaluates workspace paths against allow/deny globs
//! (deny first, default deny); [`SecretRedactor`] scrubs configured secret
//! patterns from text.

pub mod core;
pub mod rate_limit;
pub mod security;
pub mod tool;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use rate_limit::{RateLimitDecision, RateLimitRules};
pub use security::{PathSandbox, REDACTION_MARKER, SecretRedactor, glob_to_regex};
pub use tool::{
    BatchPlan, CacheKey, DefaultToolValidator, ExecutorMetadata, ExecutorResult, Indexed,
    InputSchema, MutatingTools, PropertySchema, PropertyType, SHARED_WRITE_KEY, ToolCall,
    ToolClass, ToolDefinition, ToolFailure, ToolOutcome, ToolSpec, ToolValidator,
    ValidationReport, WriteGroup, normalize_path,
};
