//! File operation tools: read_file, write_file

use async_trait::async_trait;
use serde_json::Value;
use toolbatch_application::{ExecutionContext, ExecutorError, ToolExecutor};
use toolbatch_domain::{ExecutorMetadata, ExecutorResult, InputSchema, PropertyType, ToolDefinition};
use tracing::debug;

use super::workspace::{read_text, write_text};
use super::{optional_bool, optional_usize, path_field, require_str, resolve};

/// Tool name constants
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";

/// Get the tool definition for read_file
pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the contents of a file at the specified path",
    )
    .with_schema(
        InputSchema::object()
            .required_property("path", PropertyType::String, "Path to the file to read")
            .property(
                "offset",
                PropertyType::Integer,
                "Line number to start reading from (0-indexed)",
            )
            .property("limit", PropertyType::Integer, "Maximum number of lines to read"),
    )
}

/// Get the tool definition for write_file
pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file at the specified path. Creates the file if it doesn't exist, or overwrites if it does.",
    )
    .with_schema(
        InputSchema::object()
            .required_property("path", PropertyType::String, "Path to the file to write")
            .required_property("content", PropertyType::String, "Content to write to the file")
            .property(
                "create_dirs",
                PropertyType::Boolean,
                "Create parent directories if they don't exist",
            ),
    )
}

/// Reads a file, slices it by lines and redacts secrets.
pub struct ReadFileExecutor;

#[async_trait]
impl ToolExecutor for ReadFileExecutor {
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let path = require_str(input, "path")?;
        let relative = resolve(ctx, path)?;

        let Some(content) = read_text(ctx, &relative).await? else {
            return Ok(ExecutorResult::error(format!("File not found: {}", path)));
        };

        let offset = optional_usize(input, "offset")?.unwrap_or(0);
        let limit = optional_usize(input, "limit")?;

        let lines: Vec<&str> = content.lines().collect();
        let start = offset.min(lines.len());
        let end = match limit {
            Some(l) => start.saturating_add(l).min(lines.len()),
            None => lines.len(),
        };
        let selected = &lines[start..end];

        let output = if offset == 0 && limit.is_none() {
            ctx.redactor().redact_secrets(&content)
        } else {
            ctx.redactor().redact_secrets(&selected.join("\n"))
        };
        debug!(path = %relative, lines = selected.len(), "Read file");

        let bytes = output.len();
        Ok(ExecutorResult::success(output).with_metadata(ExecutorMetadata {
            item_count: Some(selected.len()),
            bytes: Some(bytes),
            path: Some(relative),
        }))
    }

    fn guarded_paths(&self, input: &Value) -> Vec<String> {
        path_field(input)
    }
}

/// Creates or overwrites a file.
pub struct WriteFileExecutor;

#[async_trait]
impl ToolExecutor for WriteFileExecutor {
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let path = require_str(input, "path")?;
        let content = require_str(input, "content")?;
        let create_dirs = optional_bool(input, "create_dirs").unwrap_or(false);
        let relative = resolve(ctx, path)?;

        write_text(ctx, &relative, content, create_dirs).await?;
        debug!(path = %relative, bytes = content.len(), "Wrote file");

        Ok(ExecutorResult::success(format!(
            "Successfully wrote {} bytes to {}",
            content.len(),
            relative
        ))
        .with_metadata(ExecutorMetadata {
            item_count: None,
            bytes: Some(content.len()),
            path: Some(relative),
        }))
    }

    fn guarded_paths(&self, input: &Value) -> Vec<String> {
        path_field(input)
    }
}
