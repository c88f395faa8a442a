//! Port for per-execution metrics.
//!
//! Defines the [`MetricsSink`] trait receiving one [`MetricRecord`] per
//! executor invocation. Cache hits, validation failures and rate-limited
//! calls never reach an executor and produce no record.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures machine-readable
//! measurements (e.g. JSONL).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One executor invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub tool: String,
    pub latency_ms: u64,
    /// Serialized input length in bytes.
    pub input_size: usize,
    /// Result content length in bytes.
    pub output_size: usize,
    /// Result item count hint (lines read, matches found, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Port for recording metrics.
///
/// The `record` method is intentionally synchronous and non-fallible so a
/// failing sink never disrupts tool execution.
pub trait MetricsSink: Send + Sync {
    fn record(&self, record: MetricRecord);
}

/// No-op implementation for tests and when metrics are disabled.
pub struct NoMetrics;

impl MetricsSink for NoMetrics {
    fn record(&self, _record: MetricRecord) {}
}
