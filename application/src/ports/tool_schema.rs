//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain [`ToolSpec`]) from "how to
//! serialize them for a model API" (infrastructure). This port handles the
//! JSON Schema conversion the model API requires.

use toolbatch_domain::{MutatingTools, ToolDefinition, ToolSpec};

/// Port for converting tool definitions to provider-neutral JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Convert only the tools that never write (sorted by name).
    fn read_only_tools_schema(
        &self,
        spec: &ToolSpec,
        mutating: &MutatingTools,
    ) -> Vec<serde_json::Value>;
}
