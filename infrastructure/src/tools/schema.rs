//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for a model's native tool-use API.

use toolbatch_application::ToolSchemaPort;
use toolbatch_domain::{MutatingTools, ToolDefinition, ToolSpec};

/// Default implementation producing `{ name, description, input_schema }`.
///
/// The input schema is the tool's [`InputSchema`](toolbatch_domain::InputSchema)
/// serialized as-is (`type`, `properties`, `required`, `additionalProperties`).
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": tool.input_schema,
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }

    fn read_only_tools_schema(
        &self,
        spec: &ToolSpec,
        mutating: &MutatingTools,
    ) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec
            .all()
            .filter(|t| !mutating.is_mutating(&t.name))
            .collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
