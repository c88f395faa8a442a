//! File executor limits from TOML (`[files]` section)

use serde::{Deserialize, Serialize};
use toolbatch_application::config::DEFAULT_MAX_READ_BYTES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFilesConfig {
    /// Largest file `read_file` will return
    pub max_read_bytes: u64,
}

impl Default for FileFilesConfig {
    fn default() -> Self {
        Self {
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
        }
    }
}
