//! Error types for filter evaluation.
//!
//! Every error here is a deterministic caller-input error: a malformed
//! filter, a typo in a field name, or a pattern that does not compile.
//! None of them are worth retrying, and matching never returns partial
//! results when one occurs.

use thiserror::Error;

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or evaluating a filter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The clause definition itself is malformed (e.g. empty field name).
    #[error("invalid filter definition '{name}': {reason}")]
    InvalidFilterDefinition {
        /// The raw field name as supplied by the caller
        name: String,
        /// Why the definition was rejected
        reason: String,
    },

    /// The filter references a field the record does not have.
    #[error("filter is not found: {field} (filter '{key}')")]
    FieldNotFound {
        /// The full dotted filter key
        key: String,
        /// The path segment that could not be resolved
        field: String,
    },

    /// The path ends on, or passes through, a value of the wrong shape.
    #[error("filter key ({key}) {reason}")]
    InvalidFilterPath {
        /// The full dotted filter key
        key: String,
        /// What shape mismatch was found
        reason: String,
    },

    /// A regex filter value failed to compile.
    #[error("invalid regular expression '{pattern}' for '{key}' filter: {message}")]
    InvalidRegex {
        /// The full dotted filter key
        key: String,
        /// The pattern as supplied
        pattern: String,
        /// Compiler diagnostic
        message: String,
    },
}

impl Error {
    pub(crate) fn definition(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFilterDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(key: &str, field: &str) -> Self {
        Self::FieldNotFound {
            key: key.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn path(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFilterPath {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// The dotted filter key this error refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::InvalidFilterDefinition { name, .. } => name,
            Self::FieldNotFound { key, .. }
            | Self::InvalidFilterPath { key, .. }
            | Self::InvalidRegex { key, .. } => key,
        }
    }
}
