//! Metrics configuration from TOML (`[metrics]` section)

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toolbatch_application::{MetricsSink, NoMetrics};

use crate::metrics::{FanoutMetricsSink, JsonlMetricsSink, TracingMetricsSink};

/// Raw metrics configuration
///
/// # Example
///
/// ```toml
/// [metrics]
/// jsonl_path = ".toolbatch/metrics.jsonl"
/// tracing = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetricsConfig {
    pub jsonl_path: Option<String>,
    pub tracing: bool,
}

impl Default for FileMetricsConfig {
    fn default() -> Self {
        Self {
            jsonl_path: None,
            tracing: true,
        }
    }
}

impl FileMetricsConfig {
    /// Sink combining every configured destination.
    ///
    /// An unopenable JSONL file is skipped with a warning.
    pub fn build_sink(&self) -> Arc<dyn MetricsSink> {
        let mut fanout = FanoutMetricsSink::new();
        if self.tracing {
            fanout = fanout.with_sink(Arc::new(TracingMetricsSink));
        }
        if let Some(sink) = self.jsonl_path.as_ref().and_then(JsonlMetricsSink::new) {
            fanout = fanout.with_sink(Arc::new(sink));
        }
        if fanout.is_empty() {
            Arc::new(NoMetrics)
        } else {
            Arc::new(fanout)
        }
    }
}
