//! Executor registry: tool name to definition and guarded executor.
//!
//! Built once at startup and handed to the scheduler. Registration wraps
//! every executor in a [`PathGuard`], so no executor can be reached
//! without the sandbox check.

use std::collections::HashMap;
use std::sync::Arc;

use toolbatch_domain::{ToolDefinition, ToolSpec};

use super::PathGuard;
use crate::ports::tool_executor::ToolExecutor;

#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub executor: Arc<dyn ToolExecutor>,
}

#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; a later registration under the same name replaces
    /// the earlier one.
    pub fn register<E>(self, definition: ToolDefinition, executor: E) -> Self
    where
        E: ToolExecutor + 'static,
    {
        self.register_arc(definition, Arc::new(executor))
    }

    pub fn register_arc(mut self, definition: ToolDefinition, executor: Arc<dyn ToolExecutor>) -> Self {
        let guarded = PathGuard::new(definition.name.clone(), executor);
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                executor: Arc::new(guarded),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn executor(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.tools.get(name).map(|t| Arc::clone(&t.executor))
    }

    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name).map(|t| &t.definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions of every registered tool.
    pub fn spec(&self) -> ToolSpec {
        self.tools
            .values()
            .fold(ToolSpec::new(), |spec, t| spec.register(t.definition.clone()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use crate::context::ExecutionContext;
    use crate::ports::tool_executor::ExecutorError;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use toolbatch_domain::{ExecutorResult, InputSchema, PropertyType};

    struct Echo;

    #[async_trait]
    impl ToolExecutor for Echo {
        async fn execute(
            &self,
            input: &Value,
            _ctx: &ExecutionContext,
        ) -> Result<ExecutorResult, ExecutorError> {
            Ok(ExecutorResult::success(input.to_string()))
        }

        fn guarded_paths(&self, input: &Value) -> Vec<String> {
            input
                .get("path")
                .and_then(Value::as_str)
                .map(|p| vec![p.to_string()])
                .unwrap_or_default()
        }
    }

    fn echo_definition() -> ToolDefinition {
        ToolDefinition::new("echo", "Echo the input").with_schema(
            InputSchema::object().required_property("path", PropertyType::String, "Path"),
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ExecutorRegistry::new().register(echo_definition(), Echo);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("echo"));
        assert!(registry.executor("missing").is_none());
        assert_eq!(registry.names(), vec!["echo"]);
        assert!(registry.spec().contains("echo"));
    }

    #[tokio::test]
    async fn test_registered_executors_are_guarded() {
        let registry = ExecutorRegistry::new().register(echo_definition(), Echo);
        let ctx = ExecutionContext::new("/work", Arc::new(AgentConfig::default())).unwrap();
        let executor = registry.executor("echo").unwrap();

        let denied = executor
            .execute(&json!({"path": "a/.env"}), &ctx)
            .await
            .unwrap();
        assert!(denied.is_error);
        assert!(denied.content.starts_with("Access denied"));

        let allowed = executor
            .execute(&json!({"path": "a/b.txt"}), &ctx)
            .await
            .unwrap();
        assert!(!allowed.is_error);
    }
}
