//! Alternate workspace storage port.
//!
//! When a [`StorageBinding`](crate::context::StorageBinding) is attached to
//! the execution context, file executors read and write through this store
//! (a per-app virtual filesystem) instead of the real disk.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Workspace store unavailable: {0}")]
    Unavailable(String),

    #[error("Workspace store error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Content of `path`, or `None` when it does not exist.
    async fn read(&self, app_id: &str, path: &str) -> Result<Option<String>, StoreError>;

    /// Create or replace `path`.
    async fn write(&self, app_id: &str, path: &str, content: &str) -> Result<(), StoreError>;

    /// Every path stored for `app_id`, sorted.
    async fn list(&self, app_id: &str) -> Result<Vec<String>, StoreError>;
}
