//! # Domain Errors

use hs_01_identifiers::GenerationExhausted;
use shared_types::{ErrorKind, FieldError, RepositoryError, ShipmentStatus};
use thiserror::Error;

/// Fixed message for unknown and hidden shipments alike.
pub const SHIPMENT_NOT_FOUND: &str = "Shipment not found. Please check your tracking number.";

/// Shipment ledger errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShipmentError {
    /// One or more input fields were rejected.
    #[error("Invalid shipment input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Unknown tracking number, or a shipment the caller may not see.
    #[error("Shipment not found. Please check your tracking number.")]
    NotFound,

    #[error("Cannot move shipment from {from} to {to}")]
    InvalidTransition {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// Lost the optimistic version race too many times.
    #[error("Shipment {0} was modified concurrently, retry the request")]
    Conflict(String),

    #[error(transparent)]
    GenerationExhausted(#[from] GenerationExhausted),

    #[error("Shipment storage failure: {0}")]
    Storage(String),
}

impl ShipmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::GenerationExhausted(_) => ErrorKind::GenerationExhausted,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Field-level details, for validation failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<RepositoryError> for ShipmentError {
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
