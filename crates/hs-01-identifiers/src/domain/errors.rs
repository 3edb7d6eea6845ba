//! # Domain Errors

use thiserror::Error;

/// Identifier parsing and prefix errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Prefix is not two uppercase ASCII letters.
    #[error("Invalid identifier prefix: {0:?} (expected two uppercase ASCII letters)")]
    InvalidPrefix(String),

    /// Not `PREFIX + 8 digits`.
    #[error("Malformed identifier: {0:?}")]
    Malformed(String),

    /// Well formed, but for another entity kind.
    #[error("Identifier {value} does not carry prefix {expected}")]
    WrongPrefix { expected: String, value: String },
}

/// Retries ran out without finding a free identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Identifier generation exhausted for prefix {prefix} after {attempts} attempts")]
pub struct GenerationExhausted {
    pub prefix: String,
    pub attempts: u32,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierConfigError {
    /// Tracking and quote numbers would be indistinguishable.
    #[error("Tracking and quote prefixes must differ (both are {0})")]
    SamePrefixes(String),

    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}
