//! Path sandbox: glob-based allow/deny evaluation.
//!
//! Globs are compiled into anchored regular expressions:
//!
//! | Glob | Regex | Meaning |
//! |------|-------|---------|
//! | `**/` | `(?:.*/)?` | zero or more whole path segments |
//! | `**` | `.*` | any characters, separators included |
//! | `*` | `[^/]*` | any characters within one segment |
//! | `?` | `[^/]` | exactly one non-separator character |
//! | other | escaped | literal |
//!
//! Evaluation is deny-first: a deny match forbids the path even when an
//! allow pattern also matches. A path matching no allow pattern is denied.

use regex::Regex;

use crate::core::error::DomainError;

/// Compile a glob into an anchored regex source.
pub fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    out.push('$');
    out
}

/// A compiled glob, keeping its source for diagnostics.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(glob: &str) -> Result<Self, DomainError> {
        let regex = Regex::new(&glob_to_regex(glob)).map_err(|e| DomainError::InvalidGlob {
            pattern: glob.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: glob.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Allow/deny evaluator over workspace-relative paths.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    allowed: Vec<GlobPattern>,
    denied: Vec<GlobPattern>,
}

impl PathSandbox {
    pub fn new<A, D>(allowed: A, denied: D) -> Result<Self, DomainError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        let allowed = allowed
            .into_iter()
            .map(|g| GlobPattern::new(g.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let denied = denied
            .into_iter()
            .map(|g| GlobPattern::new(g.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { allowed, denied })
    }

    pub fn is_path_allowed(&self, path: &str) -> bool {
        if self.denied.iter().any(|g| g.is_match(path)) {
            return false;
        }
        self.allowed.iter().any(|g| g.is_match(path))
    }

    /// The first deny pattern matching `path`, for diagnostics
    pub fn denying_pattern(&self, path: &str) -> Option<&str> {
        self.denied
            .iter()
            .find(|g| g.is_match(path))
            .map(|g| g.source())
    }
}
