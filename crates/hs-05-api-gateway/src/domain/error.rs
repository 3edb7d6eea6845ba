//! API error body and the single kind → status mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hs_02_shipment_ledger::ShipmentError;
use hs_03_quote_ledger::QuoteError;
use serde::Serialize;
use shared_types::{ErrorKind, FieldError};
use std::fmt;

/// Wire kind for missing or rejected credentials.
pub const UNAUTHORIZED: &str = "unauthorized";
/// Wire kind for a body over the configured size cap.
pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
/// Wire kind for a request that ran past the request timeout.
pub const TIMEOUT: &str = "timeout";

/// HTTP status for a ledger error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidTransition | ErrorKind::AlreadyProcessed | ErrorKind::Conflict => {
            StatusCode::CONFLICT
        }
        ErrorKind::GenerationExhausted | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error body: `{kind, message, fields?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ApiError {
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            kind: kind.as_str(),
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn validation(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            ..Self::from_kind(ErrorKind::Validation, message)
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            kind: UNAUTHORIZED,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn timeout() -> Self {
        Self {
            status: StatusCode::REQUEST_TIMEOUT,
            kind: TIMEOUT,
            message: "Request timed out.".into(),
            fields: Vec::new(),
        }
    }

    /// Opaque server failure; the cause is logged where it happened.
    pub fn internal() -> Self {
        Self::from_kind(ErrorKind::Internal, "Internal server error.")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut response = (status, Json(self)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<ShipmentError> for ApiError {
    fn from(err: ShipmentError) -> Self {
        match err {
            ShipmentError::Storage(_) => Self::internal(),
            ShipmentError::Validation(fields) => {
                Self::validation("Invalid shipment input.", fields)
            }
            other => Self::from_kind(other.kind(), other.to_string()),
        }
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Storage(_) => Self::internal(),
            QuoteError::Validation(fields) => Self::validation("Invalid quote request.", fields),
            other => Self::from_kind(other.kind(), other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let kind = if status == StatusCode::PAYLOAD_TOO_LARGE {
            PAYLOAD_TOO_LARGE
        } else {
            ErrorKind::Validation.as_str()
        };
        Self {
            status,
            kind,
            message: rejection.body_text(),
            fields: Vec::new(),
        }
    }
}

/// Gateway-level errors (startup and serving, never sent to clients)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server bind error on {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("server error: {0}")]
    Serve(String),
}
