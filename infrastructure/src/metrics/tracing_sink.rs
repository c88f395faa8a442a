//! Metrics as structured tracing events.

use toolbatch_application::{MetricRecord, MetricsSink};
use tracing::{info, warn};

/// Emits every record on the `toolbatch::metrics` target.
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn record(&self, record: MetricRecord) {
        if record.success {
            info!(
                target: "toolbatch::metrics",
                tool = %record.tool,
                latency_ms = record.latency_ms,
                input_size = record.input_size,
                output_size = record.output_size,
                item_count = record.item_count,
                "tool executed"
            );
        } else {
            warn!(
                target: "toolbatch::metrics",
                tool = %record.tool,
                latency_ms = record.latency_ms,
                input_size = record.input_size,
                output_size = record.output_size,
                error = record.error.as_deref().unwrap_or_default(),
                "tool failed"
            );
        }
    }
}
