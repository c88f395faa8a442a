//! Workspace configuration from TOML (`[workspace]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw workspace configuration
///
/// # Example
///
/// ```toml
/// [workspace]
/// root = "/srv/project"   # default: current directory
/// app_id = "my-app"       # identity used with the virtual store
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    pub root: Option<String>,
    pub app_id: String,
}

impl Default for FileWorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            app_id: "local".to_string(),
        }
    }
}

impl FileWorkspaceConfig {
    /// Configured root, or the current directory.
    pub fn root_path(&self) -> PathBuf {
        match &self.root {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
