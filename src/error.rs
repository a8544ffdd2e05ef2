//! Typed errors for the validation core.
//!
//! The two variants are deliberately distinct so callers can tell "your rule
//! file is broken" apart from "your environment is missing a variable" and
//! map them to different exit codes.

use thiserror::Error;

/// Fatal conditions raised by the normalizer and the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    /// The rule file is malformed. Raised by the normalizer, path-qualified
    /// (e.g. `DB_HOST.env`, `PORT.severityLevel`).
    #[error("invalid rule at {path}: {reason}")]
    InvalidRule { path: String, reason: String },

    /// A required variable is absent with no default. Raised by the engine;
    /// carries the resolved (possibly user-overridden) message.
    #[error("{message}")]
    MissingRequired { name: String, message: String },
}

impl PreflightError {
    /// Process exit code the CLI maps this error to.
    ///
    /// 1 for a missing required variable, 2 for a malformed rule file.
    pub fn exit_code(&self) -> i32 {
        match self {
            PreflightError::MissingRequired { .. } => 1,
            PreflightError::InvalidRule { .. } => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rule_display_includes_path() {
        let err = PreflightError::InvalidRule {
            path: "DB_HOST.env".to_string(),
            reason: "must be array or object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid rule at DB_HOST.env: must be array or object"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_required_display_is_resolved_message() {
        let err = PreflightError::MissingRequired {
            name: "API_KEY".to_string(),
            message: "Missing required env var \"API_KEY\". App can't start without it."
                .to_string(),
        };
        assert!(err.to_string().contains("API_KEY"));
        assert_eq!(err.exit_code(), 1);
    }
}
