//! Scheduler configuration from TOML (`[scheduler]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toolbatch_application::SchedulerConfig;
use toolbatch_application::config::DEFAULT_MAX_CONCURRENCY;
use toolbatch_domain::MutatingTools;

use super::ConfigValidationError;
use crate::tools::default_mutating_tools;

/// Raw scheduler configuration
///
/// # Example
///
/// ```toml
/// [scheduler]
/// max_concurrency = 4
///
/// [scheduler.mutating_tools]   # tool name = target-path field
/// write_file = "path"
/// patch_lines = "path"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    pub max_concurrency: usize,
    pub mutating_tools: BTreeMap<String, String>,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        let defaults = default_mutating_tools();
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            mutating_tools: defaults
                .names()
                .filter_map(|name| {
                    defaults
                        .path_field(name)
                        .map(|field| (name.to_string(), field.to_string()))
                })
                .collect(),
        }
    }
}

impl FileSchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_concurrency == 0 {
            return Err(ConfigValidationError::ZeroConcurrency);
        }
        if let Some((name, _)) = self
            .mutating_tools
            .iter()
            .find(|(name, field)| name.trim().is_empty() || field.trim().is_empty())
        {
            return Err(ConfigValidationError::InvalidMutatingTool(name.clone()));
        }
        Ok(())
    }

    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        let mutating = self
            .mutating_tools
            .iter()
            .fold(MutatingTools::new(), |tools, (name, field)| {
                tools.with_tool_field(name, field)
            });
        SchedulerConfig::default()
            .with_max_concurrency(self.max_concurrency)
            .with_mutating_tools(mutating)
    }
}
