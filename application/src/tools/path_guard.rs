//! Sandbox enforcement as an executor decorator.
//!
//! Every executor in an [`ExecutorRegistry`](super::ExecutorRegistry) is
//! wrapped in a [`PathGuard`]. Before delegating, the guard resolves each
//! path the call declares and checks it against the context's sandbox.
//! Paths discovered during execution (search hits) are the executor's own
//! responsibility.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use toolbatch_domain::ExecutorResult;
use tracing::warn;

use crate::context::ExecutionContext;
use crate::ports::tool_executor::{ExecutorError, ToolExecutor};

pub struct PathGuard {
    tool_name: String,
    inner: Arc<dyn ToolExecutor>,
}

impl PathGuard {
    pub fn new(tool_name: impl Into<String>, inner: Arc<dyn ToolExecutor>) -> Self {
        Self {
            tool_name: tool_name.into(),
            inner,
        }
    }

    /// Paths declared by the executor plus the mutating target-path field.
    fn declared_paths(&self, input: &Value, ctx: &ExecutionContext) -> Vec<String> {
        let mut paths = self.inner.guarded_paths(input);
        let target = ctx
            .config()
            .scheduler
            .mutating_tools
            .path_field(&self.tool_name)
            .and_then(|field| input.get(field))
            .and_then(Value::as_str);
        if let Some(target) = target
            && !paths.iter().any(|p| p == target)
        {
            paths.push(target.to_string());
        }
        paths
    }

    /// First declared path the sandbox refuses, as an error result.
    fn check(&self, input: &Value, ctx: &ExecutionContext) -> Option<ExecutorResult> {
        for raw in self.declared_paths(input, ctx) {
            let Some(relative) = ctx.resolve(&raw) else {
                warn!(tool = %self.tool_name, path = %raw, "Path escapes workspace root");
                return Some(ExecutorResult::error(format!(
                    "Access denied: '{}' is outside the workspace",
                    raw
                )));
            };
            if !ctx.sandbox().is_path_allowed(&relative) {
                let reason = match ctx.sandbox().denying_pattern(&relative) {
                    Some(pattern) => format!("matches denied pattern '{}'", pattern),
                    None => "is not in an allowed location".to_string(),
                };
                warn!(tool = %self.tool_name, path = %relative, %reason, "Path denied by sandbox");
                return Some(ExecutorResult::error(format!(
                    "Access denied: '{}' {}",
                    relative, reason
                )));
            }
        }
        None
    }
}

#[async_trait]
impl ToolExecutor for PathGuard {
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError> {
        if let Some(denied) = self.check(input, ctx) {
            return Ok(denied);
        }
        self.inner.execute(input, ctx).await
    }

    fn guarded_paths(&self, input: &Value) -> Vec<String> {
        self.inner.guarded_paths(input)
    }
}
