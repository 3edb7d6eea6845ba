//! CORS for the public listener, built from [`CorsConfig`].

use crate::domain::CorsConfig;
use axum::http::{HeaderName, Method};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Entries that parse; the rest are dropped.
fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

/// Create CORS layer from gateway config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age));

    let cors = if is_wildcard(&config.allowed_origins) {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(parse_all::<axum::http::HeaderValue>(&config.allowed_origins))
    };

    if is_wildcard(&config.allowed_headers) {
        cors.allow_headers(Any)
    } else {
        cors.allow_headers(parse_all::<HeaderName>(&config.allowed_headers))
    }
}
