//! Search tool: search_files

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use toolbatch_application::{ExecutionContext, ExecutorError, ToolExecutor};
use toolbatch_domain::{ExecutorMetadata, ExecutorResult, InputSchema, PropertyType, ToolDefinition};
use tracing::debug;

use super::workspace::{list_files, read_text};
use super::{optional_str, require_str};

pub const SEARCH_FILES: &str = "search_files";

/// Maximum number of matches to return
const MAX_RESULTS: usize = 1000;

/// Files larger than this are skipped (5 MB)
const MAX_SEARCH_FILE_SIZE: usize = 5 * 1024 * 1024;

pub fn search_files_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_FILES,
        "Search for a regex pattern within workspace file contents",
    )
    .with_schema(
        InputSchema::object()
            .required_property("pattern", PropertyType::String, "Regex pattern to search for")
            .property(
                "include",
                PropertyType::String,
                "Glob pattern to filter files (e.g., '**/*.rs')",
            ),
    )
}

/// Regex search over every sandbox-permitted file.
///
/// Matches are reported as `path:line: text`, with secrets redacted.
pub struct SearchFilesExecutor;

#[async_trait]
impl ToolExecutor for SearchFilesExecutor {
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let pattern = require_str(input, "pattern")?;
        let include = optional_str(input, "include");
        let regex = Regex::new(pattern)
            .map_err(|e| ExecutorError::InvalidInput(format!("Invalid regex pattern: {}", e)))?;

        let files = list_files(ctx, include).await?;
        let mut results = Vec::new();
        let mut skipped = 0usize;
        let mut truncated = false;

        'files: for path in files {
            if !ctx.is_path_allowed(&path) {
                skipped += 1;
                continue;
            }
            let content = match read_text(ctx, &path).await {
                Ok(Some(content)) if content.len() <= MAX_SEARCH_FILE_SIZE => content,
                _ => continue,
            };

            for (line_num, line) in content.lines().enumerate() {
                if regex.is_match(line) {
                    if results.len() >= MAX_RESULTS {
                        truncated = true;
                        break 'files;
                    }
                    results.push(format!("{}:{}: {}", path, line_num + 1, line));
                }
            }
        }
        debug!(pattern, matches = results.len(), skipped, "Searched files");

        let match_count = results.len();
        let mut output = if results.is_empty() {
            "No matches found".to_string()
        } else {
            results.join("\n")
        };
        if truncated {
            output.push_str(&format!("\n... (limited to {} matches)", MAX_RESULTS));
        }

        Ok(
            ExecutorResult::success(ctx.redactor().redact_secrets(&output)).with_metadata(
                ExecutorMetadata {
                    item_count: Some(match_count),
                    ..Default::default()
                },
            ),
        )
    }
}
