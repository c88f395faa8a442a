//! Content-addressed cache keys
//!
//! A key is the SHA-256 of the canonical serialization of `(name, input)`.
//! Canonical means object keys sorted at every depth and no insignificant
//! whitespace, so `{"a":1,"b":2}` and `{"b":2,"a":1}` hash identically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a canonical `(name, input)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(tool_name: &str, input: &Value) -> Self {
        let mut canonical = String::new();
        write_canonical(&Value::String(tool_name.to_string()), &mut canonical);
        canonical.push('\n');
        write_canonical(input, &mut canonical);

        let digest = Sha256::digest(canonical.as_bytes());
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialize `value` with recursively sorted object keys.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serializing a plain string cannot fail
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_ignores_object_key_order() {
        let a = CacheKey::new("read_file", &json!({"path": "a.txt", "limit": 5}));
        let b = CacheKey::new("read_file", &json!({"limit": 5, "path": "a.txt"}));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_key_depends_on_name_and_input() {
        let input = json!({"path": "a.txt"});
        assert_ne!(
            CacheKey::new("read_file", &input),
            CacheKey::new("write_file", &input)
        );
        assert_ne!(
            CacheKey::new("read_file", &input),
            CacheKey::new("read_file", &json!({"path": "b.txt"}))
        );
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let value = json!({"b": {"y": 1, "x": [true, null]}, "a": "q\"uote"});
        assert_eq!(
            canonical_json(&value),
            r#"{"a":"q\"uote","b":{"x":[true,null],"y":1}}"#
        );
    }
}
