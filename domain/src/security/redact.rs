//! Secret redaction for tool output.

use regex::Regex;

use crate::core::error::DomainError;

/// Replacement text for every redacted match.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Replaces configured secret patterns in text.
///
/// Patterns are applied in configuration order, each over the output of
/// the previous one.
#[derive(Debug, Clone, Default)]
pub struct SecretRedactor {
    patterns: Vec<Regex>,
}

impl SecretRedactor {
    pub fn new<I>(patterns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref();
                Regex::new(source).map_err(|e| DomainError::InvalidSecretPattern {
                    pattern: source.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn redact_secrets(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&redacted) {
                redacted = pattern
                    .replace_all(&redacted, regex::NoExpand(REDACTION_MARKER))
                    .into_owned();
            }
        }
        redacted
    }
}
