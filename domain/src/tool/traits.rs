//! Tool domain traits
//!
//! Contains pure domain logic for validating a call input against the
//! tool's declared [`InputSchema`](super::schema::InputSchema).
//! The async executor and validator ports live in the application layer.

use serde::{Deserialize, Serialize};

use super::entities::ToolDefinition;

/// Outcome of validating one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validator for tool inputs
///
/// This is a pure domain trait that validates inputs
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a call input against its definition
    fn validate(&self, definition: &ToolDefinition, input: &serde_json::Value) -> ValidationReport;
}

/// Default implementation of ToolValidator
///
/// Collects every violation instead of stopping at the first one so the
/// model gets a complete diagnostic in a single round-trip.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, definition: &ToolDefinition, input: &serde_json::Value) -> ValidationReport {
        let schema = &definition.input_schema;

        let Some(object) = input.as_object() else {
            return ValidationReport::invalid(vec![format!(
                "input for tool '{}' must be a JSON object",
                definition.name
            )]);
        };

        let mut errors = Vec::new();

        for name in &schema.required {
            if !object.contains_key(name) {
                errors.push(format!("missing required property '{}'", name));
            }
        }

        for (name, value) in object {
            match schema.properties.get(name) {
                Some(property) => {
                    if !property.property_type.matches(value) {
                        errors.push(format!(
                            "property '{}' must be of type {}",
                            name, property.property_type
                        ));
                    }
                }
                None if !schema.additional_properties => {
                    errors.push(format!("unexpected property '{}'", name));
                }
                None => {}
            }
        }

        ValidationReport::invalid(errors)
    }
}
