//! Schema-driven input validation.

use serde_json::Value;
use toolbatch_domain::{DefaultToolValidator, ToolSpec, ToolValidator, ValidationReport};

use crate::ports::input_validator::InputValidator;

/// [`InputValidator`] checking inputs against the tool's declared schema.
pub struct SchemaValidator {
    spec: ToolSpec,
    validator: DefaultToolValidator,
}

impl SchemaValidator {
    pub fn new(spec: ToolSpec) -> Self {
        Self {
            spec,
            validator: DefaultToolValidator,
        }
    }
}

impl InputValidator for SchemaValidator {
    fn validate(&self, tool_name: &str, input: &Value) -> ValidationReport {
        match self.spec.get(tool_name) {
            Some(definition) => self.validator.validate(definition, input),
            None => ValidationReport::invalid(vec![format!("unknown tool '{}'", tool_name)]),
        }
    }
}
