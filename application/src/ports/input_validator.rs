//! Input validation port.

use serde_json::Value;
use toolbatch_domain::ValidationReport;

/// Checks a call's input before it reaches an executor.
pub trait InputValidator: Send + Sync {
    fn validate(&self, tool_name: &str, input: &Value) -> ValidationReport;
}

/// Validator that accepts everything.
pub struct AcceptAllInput;

impl InputValidator for AcceptAllInput {
    fn validate(&self, _tool_name: &str, _input: &Value) -> ValidationReport {
        ValidationReport::ok()
    }
}
