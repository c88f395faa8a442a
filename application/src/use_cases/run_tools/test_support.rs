//! Fake executors and recorders shared by the scheduler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::Instant;
use toolbatch_domain::{
    ExecutorMetadata, ExecutorResult, InputSchema, MutatingTools, PropertyType,
    RateLimitDecision, RateLimitRules, ToolCall, ToolDefinition,
};

use super::ToolScheduler;
use crate::config::{AgentConfig, SchedulerConfig};
use crate::context::ExecutionContext;
use crate::ports::metrics::{MetricRecord, MetricsSink};
use crate::ports::rate_limiter::RateLimiter;
use crate::ports::tool_executor::{ExecutorError, ToolExecutor};
use crate::ports::workspace_store::{StoreError, WorkspaceStore};
use crate::tools::ExecutorRegistry;

/// One executor run, with its start and end on the (possibly paused) clock.
#[derive(Debug, Clone)]
pub struct Span {
    pub label: String,
    pub start: Instant,
    pub end: Instant,
}

impl Span {
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Default)]
pub struct SpanLog(Mutex<Vec<Span>>);

impl SpanLog {
    fn push(&self, span: Span) {
        self.0.lock().unwrap().push(span);
    }

    /// Spans in completion order.
    pub fn spans(&self) -> Vec<Span> {
        self.0.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.spans().into_iter().map(|s| s.label).collect()
    }

    pub fn find(&self, label: &str) -> Span {
        self.spans()
            .into_iter()
            .find(|s| s.label == label)
            .unwrap_or_else(|| panic!("no span labelled {label}"))
    }
}

/// Per-path append log standing in for file contents.
#[derive(Default)]
pub struct AppendLog(Mutex<HashMap<String, Vec<String>>>);

impl AppendLog {
    pub fn entries(&self, path: &str) -> Vec<String> {
        self.0.lock().unwrap().get(path).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RecordingMetrics(Mutex<Vec<MetricRecord>>);

impl RecordingMetrics {
    pub fn records(&self) -> Vec<MetricRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingMetrics {
    fn record(&self, record: MetricRecord) {
        self.0.lock().unwrap().push(record);
    }
}

/// Returns scripted decisions in order, then allows.
pub struct ScriptedLimiter {
    decisions: Mutex<Vec<RateLimitDecision>>,
    checks: AtomicUsize,
}

impl ScriptedLimiter {
    pub fn new(mut decisions: Vec<RateLimitDecision>) -> Self {
        decisions.reverse();
        Self {
            decisions: Mutex::new(decisions),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimiter for ScriptedLimiter {
    async fn check_limit(&self, _category: &str) -> RateLimitDecision {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.decisions
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(RateLimitDecision::allow)
    }
}

#[derive(Default)]
pub struct MemoryStore(Mutex<HashMap<(String, String), String>>);

#[async_trait]
impl WorkspaceStore for MemoryStore {
    async fn read(&self, app_id: &str, path: &str) -> Result<Option<String>, StoreError> {
        let files = self.0.lock().unwrap();
        Ok(files.get(&(app_id.to_string(), path.to_string())).cloned())
    }

    async fn write(&self, app_id: &str, path: &str, content: &str) -> Result<(), StoreError> {
        self.0
            .lock()
            .unwrap()
            .insert((app_id.to_string(), path.to_string()), content.to_string());
        Ok(())
    }

    async fn list(&self, app_id: &str) -> Result<Vec<String>, StoreError> {
        let files = self.0.lock().unwrap();
        let mut paths: Vec<String> = files
            .keys()
            .filter(|(app, _)| app == app_id)
            .map(|(_, path)| path.clone())
            .collect();
        paths.sort();
        Ok(paths)
    }
}

fn delay(input: &Value) -> Duration {
    Duration::from_millis(input.get("delay_ms").and_then(Value::as_u64).unwrap_or(0))
}

fn field<'a>(input: &'a Value, name: &str) -> &'a str {
    input.get(name).and_then(Value::as_str).unwrap_or_default()
}

struct SlowRead {
    runs: Arc<AtomicUsize>,
    spans: Arc<SpanLog>,
}

#[async_trait]
impl ToolExecutor for SlowRead {
    async fn execute(
        &self,
        input: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let start = Instant::now();
        tokio::time::sleep(delay(input)).await;
        self.runs.fetch_add(1, Ordering::SeqCst);
        let path = field(input, "path");
        self.spans.push(Span {
            label: path.to_string(),
            start,
            end: Instant::now(),
        });
        Ok(ExecutorResult::success(format!("read {}", path)).with_metadata(
            ExecutorMetadata {
                item_count: Some(1),
                ..Default::default()
            },
        ))
    }

    fn guarded_paths(&self, input: &Value) -> Vec<String> {
        vec![field(input, "path").to_string()]
    }
}

struct SlowAppend {
    files: Arc<AppendLog>,
    spans: Arc<SpanLog>,
}

#[async_trait]
impl ToolExecutor for SlowAppend {
    async fn execute(
        &self,
        input: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        let start = Instant::now();
        let path = field(input, "path").to_string();
        let value = field(input, "value").to_string();
        tokio::time::sleep(delay(input)).await;
        self.files
            .0
            .lock()
            .unwrap()
            .entry(path.clone())
            .or_default()
            .push(value.clone());
        self.spans.push(Span {
            label: format!("{}={}", path, value),
            start,
            end: Instant::now(),
        });
        Ok(ExecutorResult::success(format!("appended {} to {}", value, path)))
    }
}

struct CountingSearch {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl ToolExecutor for CountingSearch {
    async fn execute(
        &self,
        input: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutorResult::success(format!("results for {}", field(input, "query"))))
    }
}

struct Failing;

#[async_trait]
impl ToolExecutor for Failing {
    async fn execute(
        &self,
        _input: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        Err(ExecutorError::Failed("disk on fire".to_string()))
    }
}

struct Panicking;

#[async_trait]
impl ToolExecutor for Panicking {
    async fn execute(
        &self,
        _input: &Value,
        _ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        panic!("executor exploded")
    }
}

struct StorageReporter;

#[async_trait]
impl ToolExecutor for StorageReporter {
    async fn execute(
        &self,
        _input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        Ok(match ctx.storage() {
            Some(binding) => ExecutorResult::success(format!("virtual:{}", binding.app_id)),
            None => ExecutorResult::success("disk"),
        })
    }
}

pub fn test_context() -> ExecutionContext {
    let config = AgentConfig::default()
        .with_scheduler(
            SchedulerConfig::default()
                .with_max_concurrency(2)
                .with_mutating_tools(MutatingTools::new().with_tool("append")),
        )
        .with_rate_limits(RateLimitRules::new().with_category("search", ["web_"]));
    ExecutionContext::new("/work", Arc::new(config)).unwrap()
}

pub struct Harness {
    pub scheduler: ToolScheduler,
    pub metrics: Arc<RecordingMetrics>,
    pub reads: Arc<AtomicUsize>,
    pub searches: Arc<AtomicUsize>,
    pub spans: Arc<SpanLog>,
    pub files: Arc<AppendLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(test_context(), None, None)
    }

    pub fn with_limiter(limiter: Arc<dyn RateLimiter>) -> Self {
        Self::build(test_context(), None, Some(limiter))
    }

    pub fn with_concurrency(max: usize) -> Self {
        let config = test_context().config().scheduler.clone().with_max_concurrency(max);
        Self::build(test_context(), Some(config), None)
    }

    /// Harness over `context` with its scheduler settings replaced by `config`.
    pub fn with_overrides(context: ExecutionContext, config: SchedulerConfig) -> Self {
        Self::build(context, Some(config), None)
    }

    fn build(
        context: ExecutionContext,
        config: Option<SchedulerConfig>,
        limiter: Option<Arc<dyn RateLimiter>>,
    ) -> Self {
        let metrics = Arc::new(RecordingMetrics::default());
        let reads = Arc::new(AtomicUsize::new(0));
        let searches = Arc::new(AtomicUsize::new(0));
        let spans = Arc::new(SpanLog::default());
        let files = Arc::new(AppendLog::default());

        let registry = ExecutorRegistry::new()
            .register(
                ToolDefinition::new("read_file", "Read").with_schema(
                    InputSchema::object()
                        .required_property("path", PropertyType::String, "Path")
                        .property("delay_ms", PropertyType::Integer, "Latency"),
                ),
                SlowRead {
                    runs: reads.clone(),
                    spans: spans.clone(),
                },
            )
            .register(
                ToolDefinition::new("append", "Append").with_schema(
                    InputSchema::object()
                        .required_property("path", PropertyType::String, "Path")
                        .required_property("value", PropertyType::String, "Value")
                        .property("delay_ms", PropertyType::Integer, "Latency"),
                ),
                SlowAppend {
                    files: files.clone(),
                    spans: spans.clone(),
                },
            )
            .register(
                ToolDefinition::new("web_search", "Search").with_schema(
                    InputSchema::object().required_property("query", PropertyType::String, "Q"),
                ),
                CountingSearch {
                    runs: searches.clone(),
                },
            )
            .register(ToolDefinition::new("fail", "Always fails"), Failing)
            .register(ToolDefinition::new("panic", "Always panics"), Panicking)
            .register(ToolDefinition::new("which_storage", "Reports storage"), StorageReporter);

        let mut builder = ToolScheduler::builder(registry, context).metrics(metrics.clone());
        if let Some(config) = config {
            builder = builder.config(config);
        }
        if let Some(limiter) = limiter {
            builder = builder.rate_limiter(limiter);
        }

        Self {
            scheduler: builder.build(),
            metrics,
            reads,
            searches,
            spans,
            files,
        }
    }
}

pub fn read_call(id: &str, path: &str, delay_ms: u64) -> ToolCall {
    ToolCall::new(id, "read_file").with_input(json!({"path": path, "delay_ms": delay_ms}))
}

pub fn append_call(id: &str, path: &str, value: &str, delay_ms: u64) -> ToolCall {
    ToolCall::new(id, "append")
        .with_input(json!({"path": path, "value": value, "delay_ms": delay_ms}))
}

pub fn search_call(id: &str, query: &str) -> ToolCall {
    ToolCall::new(id, "web_search").with_input(json!({"query": query}))
}
