//! Storage-agnostic file access for executors.
//!
//! When the context carries a [`StorageBinding`](toolbatch_application::StorageBinding)
//! every operation goes through the bound workspace store; otherwise it
//! touches the real filesystem under the context's working root.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use toolbatch_application::{ExecutionContext, ExecutorError};
use toolbatch_domain::normalize_path;
use toolbatch_domain::security::GlobPattern;

/// Read a workspace file as text. `Ok(None)` when it does not exist.
///
/// Files larger than the configured `max_read_bytes` are refused.
pub async fn read_text(
    ctx: &ExecutionContext,
    relative: &str,
) -> Result<Option<String>, ExecutorError> {
    let max = ctx.config().max_read_bytes;

    if let Some(binding) = ctx.storage() {
        let content = binding.store.read(&binding.app_id, relative).await?;
        if let Some(content) = &content {
            check_size(content.len() as u64, max)?;
        }
        return Ok(content);
    }

    let path = ctx.absolute(relative);
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(ExecutorError::InvalidInput(format!(
            "'{}' is not a file",
            relative
        )));
    }
    check_size(metadata.len(), max)?;

    Ok(Some(tokio::fs::read_to_string(&path).await?))
}

fn check_size(len: u64, max: u64) -> Result<(), ExecutorError> {
    if len > max {
        return Err(ExecutorError::InvalidInput(format!(
            "File too large ({} bytes). Maximum size is {} bytes",
            len, max
        )));
    }
    Ok(())
}

/// Create or replace a workspace file.
pub async fn write_text(
    ctx: &ExecutionContext,
    relative: &str,
    content: &str,
    create_dirs: bool,
) -> Result<(), ExecutorError> {
    if let Some(binding) = ctx.storage() {
        binding.store.write(&binding.app_id, relative, content).await?;
        return Ok(());
    }

    let path = ctx.absolute(relative);
    if let Some(parent) = path.parent() {
        let exists = tokio::fs::try_exists(parent).await.unwrap_or(false);
        if !exists && create_dirs {
            tokio::fs::create_dir_all(parent).await?;
        } else if !exists {
            return Err(ExecutorError::InvalidInput(format!(
                "Parent directory does not exist: {}",
                parent.display()
            )));
        }
    }
    tokio::fs::write(&path, content).await?;
    Ok(())
}

/// Workspace-relative paths of every file, optionally filtered by a glob.
///
/// Sorted; `/`-separated. An `include` that climbs out of the working root
/// is refused, and listed paths that do not resolve inside it are dropped.
/// The sandbox is not applied here.
pub async fn list_files(
    ctx: &ExecutionContext,
    include: Option<&str>,
) -> Result<Vec<String>, ExecutorError> {
    let include = include.map(confine_include).transpose()?;

    let listed: Vec<String> = if let Some(binding) = ctx.storage() {
        let filter = include
            .as_deref()
            .map(GlobPattern::new)
            .transpose()
            .map_err(|e| ExecutorError::InvalidInput(e.to_string()))?;
        binding
            .store
            .list(&binding.app_id)
            .await?
            .into_iter()
            .filter(|p| filter.as_ref().is_none_or(|g| g.is_match(p)))
            .collect()
    } else {
        let root = ctx.working_root().to_path_buf();
        let include = include.unwrap_or_else(|| "**/*".to_string());
        tokio::task::spawn_blocking(move || walk(&root, &include))
            .await
            .map_err(|e| ExecutorError::Failed(format!("File walk aborted: {}", e)))??
    };

    let mut paths: Vec<String> = listed
        .into_iter()
        .filter_map(|p| ctx.resolve(&p))
        .collect();
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Normalize an include glob to a root-relative pattern.
fn confine_include(include: &str) -> Result<String, ExecutorError> {
    let normalized = normalize_path(include);
    let relative = normalized.trim_start_matches('/');
    if relative == ".." || relative.starts_with("../") {
        return Err(ExecutorError::InvalidInput(format!(
            "Include pattern '{}' must stay inside the workspace",
            include
        )));
    }
    Ok(relative.to_string())
}

fn walk(root: &Path, include: &str) -> Result<Vec<String>, ExecutorError> {
    let pattern = format!("{}/{}", Pattern::escape(&root.to_string_lossy()), include);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = glob::glob_with(&pattern, options)
        .map_err(|e| ExecutorError::InvalidInput(format!("Invalid glob pattern: {}", e)))?;

    let mut paths: Vec<String> = entries
        .flatten()
        .filter(|p| p.is_file())
        .filter_map(|p| relative_to(root, &p))
        .collect();
    paths.sort();
    Ok(paths)
}

fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let rest = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
