//! Metrics sinks: adapters for the [`MetricsSink`](toolbatch_application::MetricsSink) port.
//!
//! - [`JsonlMetricsSink`]: one JSON object per line in a file
//! - [`TracingMetricsSink`]: one structured `tracing` event per record
//! - [`FanoutMetricsSink`]: forwards each record to several sinks

mod fanout;
mod jsonl;
mod tracing_sink;

pub use fanout::FanoutMetricsSink;
pub use jsonl::JsonlMetricsSink;
pub use tracing_sink::TracingMetricsSink;
