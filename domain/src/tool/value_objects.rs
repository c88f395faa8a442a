//! Tool domain value objects: executor answers before wire-wrapping
//!
//! An executor produces an [`ExecutorResult`]; the scheduler caches it,
//! meters it and finally wraps it into a
//! [`ToolOutcome`](super::entities::ToolOutcome) carrying the call id.

use serde::{Deserialize, Serialize};

use super::entities::ToolOutcome;

/// Structured metadata an executor may attach to its result.
///
/// | Tool | `item_count` | `bytes` | `path` |
/// |------|:---:|:---:|:---:|
/// | `read_file` | lines | yes | yes |
/// | `write_file` | - | yes | yes |
/// | `patch_lines` | lines replaced | yes | yes |
/// | `search_files` | matches | - | - |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorMetadata {
    /// Number of items produced (lines, matches, entries); recorded in metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    /// Number of bytes processed/returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// For file operations: the affected workspace path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Raw answer of an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorResult {
    pub content: String,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExecutorMetadata>,
}

impl ExecutorResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            metadata: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ExecutorMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Item-count hint supplied by the executor, if any
    pub fn item_count(&self) -> Option<usize> {
        self.metadata.as_ref().and_then(|m| m.item_count)
    }

    pub fn to_outcome(&self, tool_call_id: impl Into<String>) -> ToolOutcome {
        ToolOutcome {
            tool_call_id: tool_call_id.into(),
            content: self.content.clone(),
            is_error: self.is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_result_to_outcome() {
        let result = ExecutorResult::success("3 lines").with_metadata(ExecutorMetadata {
            item_count: Some(3),
            path: Some("src/lib.rs".to_string()),
            ..Default::default()
        });

        let outcome = result.to_outcome("toolu_9");
        assert_eq!(outcome.tool_call_id, "toolu_9");
        assert_eq!(outcome.content, "3 lines");
        assert!(!outcome.is_error);
        assert_eq!(result.item_count(), Some(3));
    }

    #[test]
    fn test_error_result_has_no_item_count() {
        let result = ExecutorResult::error("boom");
        assert!(result.is_error);
        assert_eq!(result.item_count(), None);
    }
}
