//! Admin listener: operator tooling for shipment bookings, status updates
//! and quote pricing.

use super::ApiJson;
use crate::domain::ApiError;
use crate::router::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use hs_02_shipment_ledger::{NewShipment, Shipment, ShipmentUpdate, TrackedShipment, TransitionRequest};
use hs_03_quote_ledger::QuoteRequest;
use hs_04_access_gate::{admin_grant, AdminGrant};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::Caller;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ProcessQuote {
    pub quoted_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct VesselDetached {
    pub cleared: usize,
}

fn grant(caller: &Caller) -> Result<AdminGrant, ApiError> {
    admin_grant(caller).ok_or_else(|| ApiError::unauthorized("Administrative access required."))
}

/// `POST /admin/shipments`
pub async fn create_shipment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(fields): ApiJson<NewShipment>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    let grant = grant(&caller)?;
    let shipment = state.shipments.create(&grant, fields).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

/// `GET /admin/shipments/{tracking_number}`
pub async fn get_shipment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackedShipment>, ApiError> {
    grant(&caller)?;
    Ok(Json(state.shipments.get(&caller, &tracking_number).await?))
}

/// `POST /admin/shipments/{tracking_number}/updates`
pub async fn record_update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(tracking_number): Path<String>,
    ApiJson(request): ApiJson<TransitionRequest>,
) -> Result<(StatusCode, Json<ShipmentUpdate>), ApiError> {
    let grant = grant(&caller)?;
    let update = state
        .shipments
        .transition(&grant, &tracking_number, request)
        .await?;
    Ok((StatusCode::CREATED, Json(update)))
}

/// `POST /admin/vessels/{vessel}/detach`
pub async fn detach_vessel(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(vessel): Path<String>,
) -> Result<Json<VesselDetached>, ApiError> {
    let grant = grant(&caller)?;
    let cleared = state.shipments.detach_vessel(&grant, &vessel).await?;
    info!(vessel = %vessel, cleared, "[hs-05] Vessel removed from catalog");
    Ok(Json(VesselDetached { cleared }))
}

/// `GET /admin/quotes/{quote_number}`
pub async fn get_quote(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(quote_number): Path<String>,
) -> Result<Json<QuoteRequest>, ApiError> {
    grant(&caller)?;
    Ok(Json(state.quotes.get(&caller, &quote_number).await?))
}

/// `POST /admin/quotes/{quote_number}/process`
pub async fn process_quote(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(quote_number): Path<String>,
    ApiJson(body): ApiJson<ProcessQuote>,
) -> Result<Json<QuoteRequest>, ApiError> {
    let grant = grant(&caller)?;
    let quote = state
        .quotes
        .mark_processed(&grant, &quote_number, body.quoted_price)
        .await?;
    Ok(Json(quote))
}
