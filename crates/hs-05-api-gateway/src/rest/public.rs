//! Public listener: customer-facing tracking and quote endpoints.

use super::ApiJson;
use crate::domain::ApiError;
use crate::router::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hs_02_shipment_ledger::{Shipment, TrackedShipment};
use hs_03_quote_ledger::{NewQuoteRequest, QuoteRequest};
use serde::Serialize;
use shared_types::{Caller, SubjectId};

pub const QUOTE_SUBMITTED: &str = "Quote request submitted successfully!";

#[derive(Debug, Serialize)]
pub struct QuoteSubmitted {
    pub message: &'static str,
    pub quote_number: String,
}

/// The subject behind a public request. The auth layer only ever attaches
/// subjects here, so an admin caller is treated as unauthenticated.
fn subject(caller: &Caller) -> Result<&SubjectId, ApiError> {
    caller
        .subject_id()
        .ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided."))
}

/// `POST /quote`
pub async fn submit_quote(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(fields): ApiJson<NewQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteSubmitted>), ApiError> {
    let owner = subject(&caller)?;
    let quote = state.quotes.create(fields, owner).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuoteSubmitted {
            message: QUOTE_SUBMITTED,
            quote_number: quote.quote_number.into_string(),
        }),
    ))
}

/// `GET /quote/{quote_number}`
pub async fn get_quote(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(quote_number): Path<String>,
) -> Result<Json<QuoteRequest>, ApiError> {
    Ok(Json(state.quotes.get(&caller, &quote_number).await?))
}

/// `GET /track/{tracking_number}`
pub async fn track_shipment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackedShipment>, ApiError> {
    Ok(Json(state.shipments.get(&caller, &tracking_number).await?))
}

/// `GET /user/shipments`
pub async fn my_shipments(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Shipment>>, ApiError> {
    let owner = subject(&caller)?;
    Ok(Json(state.shipments.list_for_owner(owner).await?))
}

/// `GET /user/quotes`
pub async fn my_quotes(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<QuoteRequest>>, ApiError> {
    let owner = subject(&caller)?;
    Ok(Json(state.quotes.list_for_owner(owner).await?))
}
