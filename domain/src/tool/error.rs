//! Failure kinds surfaced as error outcomes
//!
//! None of these escape the scheduler as Rust errors: each one becomes a
//! `ToolOutcome` with `is_error = true` and its `Display` text as content.

use thiserror::Error;

/// Why a tool call did not produce a successful result.
///
/// | Kind | Metered? | Executor ran? |
/// |------|:---:|:---:|
/// | `UnknownTool` | No | No |
/// | `ValidationFailed` | No | No |
/// | `RateLimited` | No | No |
/// | `ExecutionFailed` | Yes | Yes |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFailure {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input for tool '{tool}': {}", errors.join("; "))]
    ValidationFailed { tool: String, errors: Vec<String> },

    #[error("Rate limit exceeded for '{category}' tools ({tool}); retry after {retry_after_secs} seconds")]
    RateLimited {
        tool: String,
        category: String,
        retry_after_secs: u64,
    },

    #[error("Tool '{tool}' failed: {message}")]
    ExecutionFailed { tool: String, message: String },
}

impl ToolFailure {
    /// Only real execution attempts produce metric records
    pub fn is_metered(&self) -> bool {
        matches!(self, ToolFailure::ExecutionFailed { .. })
    }
}
