//! Output formatter trait

use toolbatch_domain::{ToolCall, ToolOutcome};

/// Trait for formatting batch results
pub trait OutputFormatter {
    /// Human-readable listing of each call with its outcome
    fn format(&self, calls: &[ToolCall], outcomes: &[ToolOutcome]) -> String;

    /// `tool_result` wire blocks as a JSON array
    fn format_json(&self, outcomes: &[ToolOutcome]) -> String;
}
