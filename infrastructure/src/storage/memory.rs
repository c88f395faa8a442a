//! In-memory virtual workspace.
//!
//! Implements the [`WorkspaceStore`] port with a map keyed by
//! `(app_id, path)`. Stands in for a database-backed per-app filesystem.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use toolbatch_application::{StoreError, WorkspaceStore};

#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    files: RwLock<BTreeMap<(String, String), String>>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed files for one app (builder pattern).
    pub fn with_files<I, P, C>(self, app_id: &str, files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        if let Ok(mut map) = self.files.write() {
            for (path, content) in files {
                map.insert((app_id.to_string(), path.into()), content.into());
            }
        }
        self
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("workspace lock poisoned".to_string())
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspace {
    async fn read(&self, app_id: &str, path: &str) -> Result<Option<String>, StoreError> {
        let files = self.files.read().map_err(|_| Self::poisoned())?;
        Ok(files.get(&(app_id.to_string(), path.to_string())).cloned())
    }

    async fn write(&self, app_id: &str, path: &str, content: &str) -> Result<(), StoreError> {
        let mut files = self.files.write().map_err(|_| Self::poisoned())?;
        files.insert((app_id.to_string(), path.to_string()), content.to_string());
        Ok(())
    }

    async fn list(&self, app_id: &str) -> Result<Vec<String>, StoreError> {
        let files = self.files.read().map_err(|_| Self::poisoned())?;
        Ok(files
            .keys()
            .filter(|(app, _)| app == app_id)
            .map(|(_, path)| path.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apps_are_isolated() {
        let store = InMemoryWorkspace::new().with_files("a", [("x.txt", "from a")]);
        store.write("b", "x.txt", "from b").await.unwrap();

        assert_eq!(store.read("a", "x.txt").await.unwrap().as_deref(), Some("from a"));
        assert_eq!(store.read("b", "x.txt").await.unwrap().as_deref(), Some("from b"));
        assert_eq!(store.read("c", "x.txt").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_sorted_per_app() {
        let store = InMemoryWorkspace::new()
            .with_files("a", [("src/b.rs", ""), ("README.md", ""), ("src/a.rs", "")])
            .with_files("other", [("z", "")]);

        assert_eq!(
            store.list("a").await.unwrap(),
            vec!["README.md", "src/a.rs", "src/b.rs"]
        );
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryWorkspace::new();
        store.write("a", "f", "v1").await.unwrap();
        store.write("a", "f", "v2").await.unwrap();
        assert_eq!(store.read("a", "f").await.unwrap().as_deref(), Some("v2"));
    }
}
