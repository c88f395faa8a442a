//! Sandbox configuration from TOML (`[sandbox]` section)

use serde::{Deserialize, Serialize};
use toolbatch_application::SandboxConfig;

/// Raw sandbox configuration
///
/// Lists replace the defaults rather than extending them.
///
/// # Example
///
/// ```toml
/// [sandbox]
/// allowed_paths = ["**"]
/// denied_paths = ["**/.env", "**/.env.*", "**/.git/**"]
/// secret_patterns = ["sk-[A-Za-z0-9_-]{20,}"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSandboxConfig {
    pub allowed_paths: Vec<String>,
    pub denied_paths: Vec<String>,
    pub secret_patterns: Vec<String>,
}

impl Default for FileSandboxConfig {
    fn default() -> Self {
        let defaults = SandboxConfig::default();
        Self {
            allowed_paths: defaults.allowed_paths,
            denied_paths: defaults.denied_paths,
            secret_patterns: defaults.secret_patterns,
        }
    }
}

impl FileSandboxConfig {
    pub fn to_sandbox_config(&self) -> SandboxConfig {
        SandboxConfig {
            allowed_paths: self.allowed_paths.clone(),
            denied_paths: self.denied_paths.clone(),
            secret_patterns: self.secret_patterns.clone(),
        }
    }
}
