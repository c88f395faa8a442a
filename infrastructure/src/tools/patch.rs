//! Line-range patch tool: patch_lines

use async_trait::async_trait;
use serde_json::Value;
use toolbatch_application::{ExecutionContext, ExecutorError, ToolExecutor};
use toolbatch_domain::{ExecutorMetadata, ExecutorResult, InputSchema, PropertyType, ToolDefinition};
use tracing::debug;

use super::workspace::{read_text, write_text};
use super::{path_field, require_str, require_usize, resolve};

pub const PATCH_LINES: &str = "patch_lines";

pub fn patch_lines_definition() -> ToolDefinition {
    ToolDefinition::new(
        PATCH_LINES,
        "Replace an inclusive, 1-based range of lines in an existing file",
    )
    .with_schema(
        InputSchema::object()
            .required_property("path", PropertyType::String, "Path to the file to patch")
            .required_property("start_line", PropertyType::Integer, "First line to replace (1-based)")
            .required_property("end_line", PropertyType::Integer, "Last line to replace (inclusive)")
            .required_property(
                "replacement",
                PropertyType::String,
                "New text for the range; empty deletes the lines",
            ),
    )
}

/// Replace lines `start..=end` (1-based) of `content`.
///
/// A trailing newline on the original is preserved.
pub fn patch_content(
    content: &str,
    start: usize,
    end: usize,
    replacement: &str,
) -> Result<String, String> {
    let lines: Vec<&str> = content.lines().collect();
    if start == 0 || end < start {
        return Err(format!("Invalid line range {}-{}", start, end));
    }
    if end > lines.len() {
        return Err(format!(
            "Line range {}-{} is past the end of the file ({} lines)",
            start,
            end,
            lines.len()
        ));
    }

    let mut patched: Vec<&str> = Vec::with_capacity(lines.len());
    patched.extend_from_slice(&lines[..start - 1]);
    patched.extend(replacement.lines());
    patched.extend_from_slice(&lines[end..]);

    let mut output = patched.join("\n");
    if content.ends_with('\n') && !output.is_empty() {
        output.push('\n');
    }
    Ok(output)
}

pub struct PatchLinesExecutor;

#[async_trait]
impl ToolExecutor for PatchLinesExecutor {
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let path = require_str(input, "path")?;
        let start = require_usize(input, "start_line")?;
        let end = require_usize(input, "end_line")?;
        let replacement = require_str(input, "replacement")?;
        let relative = resolve(ctx, path)?;

        let Some(content) = read_text(ctx, &relative).await? else {
            return Ok(ExecutorResult::error(format!("File not found: {}", path)));
        };

        let patched =
            patch_content(&content, start, end, replacement).map_err(ExecutorError::InvalidInput)?;
        write_text(ctx, &relative, &patched, false).await?;

        let total = patched.lines().count();
        debug!(path = %relative, start, end, total, "Patched file");

        Ok(ExecutorResult::success(format!(
            "Replaced lines {}-{} of {} ({} lines now)",
            start, end, relative, total
        ))
        .with_metadata(ExecutorMetadata {
            item_count: Some(end - start + 1),
            bytes: Some(patched.len()),
            path: Some(relative),
        }))
    }

    fn guarded_paths(&self, input: &Value) -> Vec<String> {
        path_field(input)
    }
}
