//! Authentication middleware.
//!
//! Two layers, one per listener:
//!
//! - [`SubjectAuthLayer`] resolves `Authorization: Bearer <token>` through the
//!   [`IdentityProvider`] and attaches `Caller::Subject`.
//! - [`AdminAuthLayer`] requires localhost (unless `allow_external`) and the
//!   configured API key, then attaches `Caller::Admin`.
//!
//! Handlers read the caller with `Extension<Caller>`.

use crate::domain::ApiError;
use crate::ports::IdentityProvider;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    response::{IntoResponse, Response},
};
use hs_04_access_gate::constant_time_compare;
use shared_types::Caller;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

type BoxResponseFuture<E> = Pin<Box<dyn Future<Output = Result<Response, E>> + Send>>;

/// Bearer token from the `Authorization` header.
fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

// =============================================================================
// PUBLIC LISTENER
// =============================================================================

/// Subject authentication layer
#[derive(Clone)]
pub struct SubjectAuthLayer {
    identity: Arc<dyn IdentityProvider>,
}

impl SubjectAuthLayer {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }
}

impl<S> Layer<S> for SubjectAuthLayer {
    type Service = SubjectAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SubjectAuthService {
            inner,
            identity: Arc::clone(&self.identity),
        }
    }
}

#[derive(Clone)]
pub struct SubjectAuthService<S> {
    inner: S,
    identity: Arc<dyn IdentityProvider>,
}

impl<S> Service<Request<Body>> for SubjectAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxResponseFuture<S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let identity = Arc::clone(&self.identity);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let subject = match bearer_token(&req) {
                None => {
                    debug!(path = %req.uri().path(), "[hs-05] Missing bearer token");
                    return Ok(ApiError::unauthorized(
                        "Authentication credentials were not provided.",
                    )
                    .into_response());
                }
                Some(token) => identity.resolve(token),
            };

            let Some(subject) = subject else {
                warn!(path = %req.uri().path(), "[hs-05] Rejected unknown bearer token");
                return Ok(ApiError::unauthorized("Invalid token.").into_response());
            };

            debug!(subject = %subject, "[hs-05] Subject authenticated");
            req.extensions_mut().insert(Caller::Subject(subject));
            inner.call(req).await
        })
    }
}

// =============================================================================
// ADMIN LISTENER
// =============================================================================

/// Admin listener authentication settings
#[derive(Clone, Default)]
pub struct AdminAuthConfig {
    /// API key (None = no key required, localhost check only)
    pub api_key: Option<String>,
    /// Accept non-localhost callers (DANGER)
    pub allow_external: bool,
}

/// Admin authentication layer
#[derive(Clone)]
pub struct AdminAuthLayer {
    config: Arc<AdminAuthConfig>,
}

impl AdminAuthLayer {
    pub fn new(config: AdminAuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for AdminAuthLayer {
    type Service = AdminAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminAuthService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

#[derive(Clone)]
pub struct AdminAuthService<S> {
    inner: S,
    config: Arc<AdminAuthConfig>,
}

impl<S> Service<Request<Body>> for AdminAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxResponseFuture<S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let is_localhost = is_request_from_localhost(&req);
            if !is_localhost && !config.allow_external {
                warn!(path = %req.uri().path(), "[hs-05] Admin access denied - localhost required");
                return Ok(
                    ApiError::unauthorized("Admin access requires localhost.").into_response()
                );
            }

            if !check_api_key(&req, &config) {
                warn!(path = %req.uri().path(), "[hs-05] Admin access denied - API key required");
                return Ok(ApiError::unauthorized("Admin access requires API key.").into_response());
            }

            req.extensions_mut().insert(Caller::Admin);
            inner.call(req).await
        })
    }
}

/// Peer address from `ConnectInfo` is loopback.
///
/// Forwarding headers are ignored: the admin listener is reached directly.
fn is_request_from_localhost<B>(req: &Request<B>) -> bool {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .is_some_and(|ConnectInfo(addr)| is_localhost_ip(addr.ip()))
}

fn is_localhost_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback()),
    }
}

/// API key from `Authorization: Bearer` or `X-API-Key`.
fn check_api_key<B>(req: &Request<B>, config: &AdminAuthConfig) -> bool {
    let Some(expected) = &config.api_key else {
        return true;
    };

    if let Some(token) = bearer_token(req) {
        return constant_time_compare(token, expected);
    }

    req.headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| constant_time_compare(key, expected))
}
