//! Reference tool executors
//!
//! Concrete [`ToolExecutor`](toolbatch_application::ToolExecutor)
//! implementations over the real filesystem or, when a storage binding is
//! attached to the context, over the virtual workspace store.
//!
//! | Tool | Class | Executor |
//! |------|-------|----------|
//! | `read_file` | read | [`ReadFileExecutor`] |
//! | `search_files` | read | [`SearchFilesExecutor`] |
//! | `write_file` | write (`path`) | [`WriteFileExecutor`] |
//! | `patch_lines` | write (`path`) | [`PatchLinesExecutor`] |

pub mod file;
pub mod patch;
pub mod schema;
pub mod search;
pub mod workspace;

pub use file::{ReadFileExecutor, WriteFileExecutor};
pub use patch::PatchLinesExecutor;
pub use schema::JsonSchemaToolConverter;
pub use search::SearchFilesExecutor;

use serde_json::Value;
use toolbatch_application::{ExecutionContext, ExecutorError, ExecutorRegistry};
use toolbatch_domain::{MutatingTools, ToolSpec};

/// Registry with every reference executor.
pub fn default_registry() -> ExecutorRegistry {
    ExecutorRegistry::new()
        .register(file::read_file_definition(), ReadFileExecutor)
        .register(file::write_file_definition(), WriteFileExecutor)
        .register(patch::patch_lines_definition(), PatchLinesExecutor)
        .register(search::search_files_definition(), SearchFilesExecutor)
}

/// The reference tools that write, each targeting its `path` field.
pub fn default_mutating_tools() -> MutatingTools {
    MutatingTools::new()
        .with_tool(file::WRITE_FILE)
        .with_tool(patch::PATCH_LINES)
}

/// Create the default tool specification with all available tools
pub fn default_tool_spec() -> ToolSpec {
    default_registry().spec()
}

pub(crate) fn require_str<'a>(input: &'a Value, field: &str) -> Result<&'a str, ExecutorError> {
    input
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ExecutorError::InvalidInput(format!("missing string field '{}'", field)))
}

pub(crate) fn require_u64(input: &Value, field: &str) -> Result<u64, ExecutorError> {
    input.get(field).and_then(Value::as_u64).ok_or_else(|| {
        ExecutorError::InvalidInput(format!("field '{}' must be a non-negative integer", field))
    })
}

pub(crate) fn optional_str<'a>(input: &'a Value, field: &str) -> Option<&'a str> {
    input.get(field).and_then(Value::as_str)
}

pub(crate) fn optional_u64(input: &Value, field: &str) -> Option<u64> {
    input.get(field).and_then(Value::as_u64)
}

/// Like [`require_u64`], refusing values that do not fit in `usize`.
pub(crate) fn require_usize(input: &Value, field: &str) -> Result<usize, ExecutorError> {
    to_usize(field, require_u64(input, field)?)
}

pub(crate) fn optional_usize(input: &Value, field: &str) -> Result<Option<usize>, ExecutorError> {
    optional_u64(input, field)
        .map(|value| to_usize(field, value))
        .transpose()
}

fn to_usize(field: &str, value: u64) -> Result<usize, ExecutorError> {
    usize::try_from(value).map_err(|_| {
        ExecutorError::InvalidInput(format!("field '{}' is too large: {}", field, value))
    })
}

/// The `path` field as the only path a call touches.
pub(crate) fn path_field(input: &Value) -> Vec<String> {
    optional_str(input, "path")
        .map(|p| vec![p.to_string()])
        .unwrap_or_default()
}

pub(crate) fn optional_bool(input: &Value, field: &str) -> Option<bool> {
    input.get(field).and_then(Value::as_bool)
}

/// Workspace-relative form of a tool-supplied path.
pub(crate) fn resolve(ctx: &ExecutionContext, path: &str) -> Result<String, ExecutorError> {
    ctx.resolve(path)
        .ok_or_else(|| ExecutorError::InvalidInput(format!("'{}' is outside the workspace", path)))
}
