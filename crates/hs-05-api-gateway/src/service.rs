//! API Gateway service: binds and serves the public and admin listeners.

use crate::domain::{GatewayConfig, GatewayError};
use crate::ports::IdentityProvider;
use crate::router::{admin_router, public_router, AppState};
use axum::Router;
use hs_02_shipment_ledger::ShipmentLedgerApi;
use hs_03_quote_ledger::QuoteLedgerApi;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    identity: Arc<dyn IdentityProvider>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        shipments: Arc<dyn ShipmentLedgerApi>,
        quotes: Arc<dyn QuoteLedgerApi>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        if config.admin.enabled && config.admin.api_key.is_none() {
            warn!("[hs-05] Admin listener has no API key; relying on localhost check only");
        }

        Ok(Self {
            config,
            state: AppState { shipments, quotes },
            identity,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router for the public listener
    pub fn public_router(&self) -> Router {
        public_router(self.state.clone(), Arc::clone(&self.identity), &self.config)
    }

    /// Router for the admin listener
    pub fn admin_router(&self) -> Router {
        admin_router(self.state.clone(), &self.config)
    }

    /// Serve both listeners until `shutdown` flips to `true`.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), GatewayError> {
        let public = serve(
            "public",
            self.config.http_addr(),
            self.public_router(),
            shutdown.clone(),
        );

        if self.config.admin.enabled {
            let admin = serve(
                "admin",
                self.config.admin_addr(),
                self.admin_router(),
                shutdown,
            );
            tokio::try_join!(public, admin)?;
        } else {
            public.await?;
        }

        info!("[hs-05] API Gateway stopped");
        Ok(())
    }
}

async fn serve(
    name: &'static str,
    addr: SocketAddr,
    router: Router,
    shutdown: watch::Receiver<bool>,
) -> Result<(), GatewayError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| GatewayError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
    info!(listener = name, addr = %addr, "[hs-05] Listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(wait_for_shutdown(shutdown))
    .await
    .map_err(|e| {
        error!(listener = name, error = %e, "[hs-05] Server error");
        GatewayError::Serve(e.to_string())
    })
}

/// Resolves once the flag is `true` or the sender is gone.
async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }
}
