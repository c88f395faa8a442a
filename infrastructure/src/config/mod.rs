//! Configuration file loading for toolbatch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLBATCH_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolbatch.toml` or `./.toolbatch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/toolbatch/config.toml`
//! 5. Fallback: `~/.config/toolbatch/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileFilesConfig, FileMetricsConfig, FileRateLimitCategory,
    FileRateLimitConfig, FileSandboxConfig, FileSchedulerConfig, FileWorkspaceConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
