//! # Domain Errors

use hs_01_identifiers::GenerationExhausted;
use shared_types::{ErrorKind, FieldError, RepositoryError};
use thiserror::Error;

/// Fixed message for unknown and hidden quote requests alike.
pub const QUOTE_NOT_FOUND: &str = "Quote request not found.";

/// Quote ledger errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Invalid quote request: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Unknown quote number, or a request the caller may not see.
    #[error("Quote request not found.")]
    NotFound,

    /// The request already carries a price.
    #[error("Quote request {0} has already been processed")]
    AlreadyProcessed(String),

    #[error("Quote request {0} was modified concurrently, retry the request")]
    Conflict(String),

    #[error(transparent)]
    GenerationExhausted(#[from] GenerationExhausted),

    #[error("Quote storage failure: {0}")]
    Storage(String),
}

impl QuoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::AlreadyProcessed(_) => ErrorKind::AlreadyProcessed,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::GenerationExhausted(_) => ErrorKind::GenerationExhausted,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<RepositoryError> for QuoteError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict { id, .. } => Self::Conflict(id),
            RepositoryError::NotFound(_) => Self::NotFound,
            other => Self::Storage(other.to_string()),
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
