//! Tool input schemas
//!
//! A JSON-Schema-shaped description of a tool's input object. Only the
//! subset the scheduler relies on is modelled: a flat property map with
//! primitive types, a `required` list and the `additionalProperties` flag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON type of a single input property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
        }
    }

    /// Whether a JSON value is an instance of this type.
    ///
    /// `integer` only accepts integral numbers; `number` accepts any number.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            PropertyType::String => value.is_string(),
            PropertyType::Integer => value.is_i64() || value.is_u64(),
            PropertyType::Number => value.is_number(),
            PropertyType::Boolean => value.is_boolean(),
            PropertyType::Array => value.is_array(),
            PropertyType::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema of one property in a tool's input object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
}

/// Input schema of a tool: always `type: object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: bool,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::object()
    }
}

impl InputSchema {
    /// Empty object schema that rejects unknown properties.
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: false,
        }
    }

    /// Add an optional property
    pub fn property(
        mut self,
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertySchema {
                property_type,
                description: description.into(),
            },
        );
        self
    }

    /// Add a property and mark it as required
    pub fn required_property(
        mut self,
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.property(name, property_type, description)
    }

    pub fn allow_additional_properties(mut self) -> Self {
        self.additional_properties = true;
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serializes_in_json_schema_shape() {
        let schema = InputSchema::object()
            .required_property("path", PropertyType::String, "File path")
            .property("limit", PropertyType::Integer, "Max lines");

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["additionalProperties"], false);
        assert_eq!(value["required"], json!(["path"]));
        assert_eq!(value["properties"]["limit"]["type"], "integer");
    }

    #[test]
    fn test_integer_rejects_fractional_numbers() {
        assert!(PropertyType::Integer.matches(&json!(3)));
        assert!(!PropertyType::Integer.matches(&json!(3.5)));
        assert!(PropertyType::Number.matches(&json!(3.5)));
        assert!(!PropertyType::String.matches(&json!(3)));
    }
}
