//! Tool Executor port
//!
//! Defines the interface for executing one tool (file reads, writes,
//! patches, searches) against the current [`ExecutionContext`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use toolbatch_domain::ExecutorResult;

use crate::context::ExecutionContext;
use crate::ports::workspace_store::StoreError;

/// Failures an executor reports instead of a result.
///
/// The scheduler converts these into error outcomes; they never escape a
/// batch.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("{0}")]
    Failed(String),
}

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer and are
/// registered in an [`ExecutorRegistry`](crate::tools::ExecutorRegistry),
/// which wraps each one in the sandbox guard.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute one call with already-validated input.
    async fn execute(
        &self,
        input: &Value,
        ctx: &ExecutionContext,
    ) -> Result<ExecutorResult, ExecutorError>;

    /// Every workspace path this call will touch, as supplied in `input`.
    ///
    /// Checked against the sandbox before `execute` runs.
    fn guarded_paths(&self, _input: &Value) -> Vec<String> {
        Vec::new()
    }
}
