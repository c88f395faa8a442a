//! Execution context shared by every call in a batch.
//!
//! The context carries the workspace root, the sandbox lists (compiled
//! once), the full [`AgentConfig`] and an optional [`StorageBinding`] that
//! redirects file I/O to an alternate workspace store. A batch sees one
//! immutable snapshot; storage is swapped between batches by the scheduler.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use toolbatch_domain::{DomainError, PathSandbox, RateLimitRules, SecretRedactor, normalize_path};

use crate::config::{AgentConfig, SchedulerConfig};
use crate::ports::workspace_store::WorkspaceStore;

/// Handle to an alternate (virtual) workspace.
///
/// When present on the context, executors read and write through `store`
/// instead of the real filesystem.
#[derive(Clone)]
pub struct StorageBinding {
    pub store: Arc<dyn WorkspaceStore>,
    pub app_id: String,
    pub session_id: Option<String>,
}

impl StorageBinding {
    pub fn new(store: Arc<dyn WorkspaceStore>, app_id: impl Into<String>) -> Self {
        Self {
            store,
            app_id: app_id.into(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

impl fmt::Debug for StorageBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageBinding")
            .field("app_id", &self.app_id)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    working_root: PathBuf,
    allowed_path_globs: Vec<String>,
    denied_path_globs: Vec<String>,
    config: Arc<AgentConfig>,
    storage: Option<StorageBinding>,
    sandbox: Arc<PathSandbox>,
    redactor: Arc<SecretRedactor>,
}

impl ExecutionContext {
    /// Build a context, compiling the sandbox globs and secret patterns of
    /// `config`.
    pub fn new(
        working_root: impl Into<PathBuf>,
        config: Arc<AgentConfig>,
    ) -> Result<Self, DomainError> {
        let sandbox = config.sandbox.build_sandbox()?;
        let redactor = config.sandbox.build_redactor()?;
        Ok(Self {
            working_root: working_root.into(),
            allowed_path_globs: config.sandbox.allowed_paths.clone(),
            denied_path_globs: config.sandbox.denied_paths.clone(),
            config,
            storage: None,
            sandbox: Arc::new(sandbox),
            redactor: Arc::new(redactor),
        })
    }

    pub fn with_storage(mut self, binding: StorageBinding) -> Self {
        self.storage = Some(binding);
        self
    }

    pub fn without_storage(mut self) -> Self {
        self.storage = None;
        self
    }

    /// Replace the scheduler settings the path guard classifies with.
    pub fn with_scheduler_config(mut self, scheduler: SchedulerConfig) -> Self {
        if self.config.scheduler != scheduler {
            let mut config = self.config.as_ref().clone();
            config.scheduler = scheduler;
            self.config = Arc::new(config);
        }
        self
    }

    pub fn with_rate_limits(mut self, rules: RateLimitRules) -> Self {
        if self.config.rate_limits != rules {
            let mut config = self.config.as_ref().clone();
            config.rate_limits = rules;
            self.config = Arc::new(config);
        }
        self
    }

    pub fn working_root(&self) -> &Path {
        &self.working_root
    }

    pub fn allowed_path_globs(&self) -> &[String] {
        &self.allowed_path_globs
    }

    pub fn denied_path_globs(&self) -> &[String] {
        &self.denied_path_globs
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn storage(&self) -> Option<&StorageBinding> {
        self.storage.as_ref()
    }

    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    pub fn redactor(&self) -> &SecretRedactor {
        &self.redactor
    }

    /// Map a tool-supplied path to a workspace-relative one.
    ///
    /// Absolute paths under the root are made relative; any other absolute
    /// path is taken as workspace-rooted (`/src/a.rs` → `src/a.rs`). Returns
    /// `None` for empty paths and paths that escape the root.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }

        let candidate = Path::new(trimmed);
        let relative = if candidate.is_absolute() {
            match candidate.strip_prefix(&self.working_root) {
                Ok(rest) => rest.to_string_lossy().into_owned(),
                Err(_) => trimmed.trim_start_matches('/').to_string(),
            }
        } else {
            trimmed.to_string()
        };

        let normalized = normalize_path(&relative);
        if normalized == ".." || normalized.starts_with("../") {
            return None;
        }
        Some(normalized)
    }

    /// Real-filesystem location of a workspace-relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        if relative.is_empty() || relative == "." {
            self.working_root.clone()
        } else {
            self.working_root.join(relative)
        }
    }

    /// Resolve and check a path against the sandbox in one step.
    pub fn is_path_allowed(&self, path: &str) -> bool {
        self.resolve(path)
            .is_some_and(|relative| self.sandbox.is_path_allowed(&relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ExecutionContext {
        ExecutionContext::new("/work/project", Arc::new(AgentConfig::default())).unwrap()
    }

    #[test]
    fn test_resolve_relative_paths() {
        let ctx = context();
        assert_eq!(ctx.resolve("src/main.rs").as_deref(), Some("src/main.rs"));
        assert_eq!(ctx.resolve("./src/../lib.rs").as_deref(), Some("lib.rs"));
        assert_eq!(ctx.resolve("a//b/").as_deref(), Some("a/b"));
    }

    #[test]
    fn test_resolve_absolute_paths() {
        let ctx = context();
        assert_eq!(
            ctx.resolve("/work/project/src/main.rs").as_deref(),
            Some("src/main.rs")
        );
        assert_eq!(ctx.resolve("/y").as_deref(), Some("y"));
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let ctx = context();
        assert_eq!(ctx.resolve("../secrets"), None);
        assert_eq!(ctx.resolve("a/../../b"), None);
        assert_eq!(ctx.resolve("/../etc/passwd"), None);
        assert_eq!(ctx.resolve("   "), None);
    }

    #[test]
    fn test_path_checks_use_config_sandbox() {
        let ctx = context();
        assert!(ctx.is_path_allowed("src/lib.rs"));
        assert!(!ctx.is_path_allowed("config/.env"));
        assert!(!ctx.is_path_allowed("/work/project/.git/HEAD"));
        assert_eq!(ctx.allowed_path_globs(), ["**".to_string()]);
    }

    #[test]
    fn test_scheduler_override_replaces_config_copy() {
        let ctx = context();
        let shared = Arc::clone(&ctx.config);
        let scheduler = SchedulerConfig::default().with_mutating_tools(
            toolbatch_domain::MutatingTools::new().with_tool("write_file"),
        );

        let ctx = ctx.with_scheduler_config(scheduler);

        assert!(ctx.config().scheduler.mutating_tools.is_mutating("write_file"));
        assert!(shared.scheduler.mutating_tools.is_empty());
        assert_eq!(ctx.config().sandbox, shared.sandbox);
    }

    #[test]
    fn test_absolute_joins_root() {
        let ctx = context();
        assert_eq!(
            ctx.absolute("src/lib.rs"),
            PathBuf::from("/work/project/src/lib.rs")
        );
        assert_eq!(ctx.absolute("."), PathBuf::from("/work/project"));
    }
}
