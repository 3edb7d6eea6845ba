//! REST handlers.
//!
//! Handlers stay thin: extract, call one ledger operation, map the result.
//! Every ledger error becomes an [`ApiError`](crate::ApiError).

pub mod admin;
pub mod public;

use crate::domain::ApiError;
use axum::extract::FromRequest;
use axum::Json;
use serde_json::{json, Value};

/// JSON body whose rejections use the gateway error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `GET /health` on both listeners.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
