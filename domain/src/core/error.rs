//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("Invalid secret pattern '{pattern}': {reason}")]
    InvalidSecretPattern { pattern: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_glob_display() {
        let error = DomainError::InvalidGlob {
            pattern: "src/[".to_string(),
            reason: "unclosed class".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid glob pattern 'src/[': unclosed class"
        );
    }
}
