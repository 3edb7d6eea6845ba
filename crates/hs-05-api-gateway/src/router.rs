//! Router assembly for the two listeners.

use crate::domain::{ApiError, GatewayConfig};
use crate::middleware::{
    create_cors_layer, AdminAuthConfig, AdminAuthLayer, SubjectAuthLayer, TracingLayer,
};
use crate::ports::IdentityProvider;
use crate::rest::{admin, health, public};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use hs_02_shipment_ledger::ShipmentLedgerApi;
use hs_03_quote_ledger::QuoteLedgerApi;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub shipments: Arc<dyn ShipmentLedgerApi>,
    pub quotes: Arc<dyn QuoteLedgerApi>,
}

/// Customer-facing routes. Everything but `/health` needs a bearer token.
pub fn public_router(
    state: AppState,
    identity: Arc<dyn IdentityProvider>,
    config: &GatewayConfig,
) -> Router {
    let routes = Router::new()
        .route("/quote", post(public::submit_quote))
        .route("/quote/:quote_number", get(public::get_quote))
        .route("/track/:tracking_number", get(public::track_shipment))
        .route("/user/shipments", get(public::my_shipments))
        .route("/user/quotes", get(public::my_quotes))
        .route_layer(SubjectAuthLayer::new(identity))
        .route("/health", get(health))
        .with_state(state);

    with_common_layers(routes, config)
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
}

/// Operator routes. The whole listener sits behind [`AdminAuthLayer`].
pub fn admin_router(state: AppState, config: &GatewayConfig) -> Router {
    let routes = Router::new()
        .route("/admin/shipments", post(admin::create_shipment))
        .route("/admin/shipments/:tracking_number", get(admin::get_shipment))
        .route(
            "/admin/shipments/:tracking_number/updates",
            post(admin::record_update),
        )
        .route("/admin/vessels/:vessel/detach", post(admin::detach_vessel))
        .route("/admin/quotes/:quote_number", get(admin::get_quote))
        .route(
            "/admin/quotes/:quote_number/process",
            post(admin::process_quote),
        )
        .route("/health", get(health))
        .with_state(state)
        .layer(AdminAuthLayer::new(AdminAuthConfig {
            api_key: config.admin.api_key.clone(),
            allow_external: config.admin.allow_external,
        }));

    with_common_layers(routes, config).layer(TracingLayer::new())
}

/// Body cap and request timeout. The cap is enforced by the JSON extractor
/// so an oversized body is rejected through [`ApiError`].
fn with_common_layers(router: Router, config: &GatewayConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(config.limits.max_request_size))
        .layer(TimeoutLayer::new(config.timeouts.request))
        .layer(map_response(timeout_body))
}

// TimeoutLayer answers with a bare 408.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return ApiError::timeout().into_response();
    }
    response
}
