//! Workspace security: path sandbox and secret redaction.
//!
//! Both are pure functions over compiled pattern sets. Enforcement happens
//! in the application layer, where every registered executor is wrapped in
//! a path guard that consults [`PathSandbox`] before touching storage.

pub mod redact;
pub mod sandbox;

pub use redact::{REDACTION_MARKER, SecretRedactor};
pub use sandbox::{GlobPattern, PathSandbox, glob_to_regex};
