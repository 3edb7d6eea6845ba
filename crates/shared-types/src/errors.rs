//! # Error Types
//!
//! The error-kind taxonomy surfaced to callers, plus the repository error
//! shared by every persistence adapter.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable, machine-readable failure kind.
///
/// Ledger errors expose one of these through their `kind()` method. The API
/// gateway maps kinds onto HTTP status codes in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or missing input. User-correctable.
    #[serde(rename = "validation_error")]
    Validation,
    /// Unknown identifier, or a record the caller may not see.
    #[serde(rename = "not_found")]
    NotFound,
    /// Status-machine violation.
    #[serde(rename = "invalid_transition")]
    InvalidTransition,
    /// Quote was already processed.
    #[serde(rename = "already_processed")]
    AlreadyProcessed,
    /// Lost a concurrent write. Retry.
    #[serde(rename = "conflict")]
    Conflict,
    /// Identifier retries ran out.
    #[serde(rename = "generation_exhausted")]
    GenerationExhausted,
    /// Backend failure. Details are logged, never returned.
    #[serde(rename = "internal_error")]
    Internal,
}

impl ErrorKind {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::InvalidTransition => "invalid_transition",
            Self::AlreadyProcessed => "already_processed",
            Self::Conflict => "conflict",
            Self::GenerationExhausted => "generation_exhausted",
            Self::Internal => "internal_error",
        }
    }

    /// Whether the caller may simply retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Insert hit the uniqueness constraint on the identifier.
    #[error("Duplicate identifier: {0}")]
    Duplicate(String),

    /// Optimistic version check failed.
    #[error("Version conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        /// Record identifier.
        id: String,
        /// Version the writer read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Record vanished between read and commit.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Storage backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Unknown wire name for one of the shared enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {what}: {value}")]
pub struct ParseEnumError {
    what: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}
