//! The runtime: container, notification worker and gateway under one
//! shutdown signal.

use crate::container::{RuntimeConfig, ShippingContainer};
use anyhow::{Context, Result};
use hs_05_api_gateway::{ApiGatewayService, StaticTokenIdentityProvider};
use shared_bus::{EventFilter, LogSink, NotificationDispatcher};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// How long background workers get to drain after shutdown is signalled.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates the ledgers, notifier and gateway.
pub struct ShippingRuntime {
    container: Arc<ShippingContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ShippingRuntime {
    /// Validate `config` and open storage.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let container =
            ShippingContainer::new(config).context("failed to open ledger storage")?;
        Ok(Self::with_container(container))
    }

    /// Wrap an already built container.
    pub fn with_container(container: ShippingContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn container(&self) -> Arc<ShippingContainer> {
        Arc::clone(&self.container)
    }

    /// Gateway over this runtime's ledgers.
    pub fn gateway(&self) -> Result<ApiGatewayService> {
        let config = &self.container.config.gateway;
        let identity = Arc::new(StaticTokenIdentityProvider::from_config(&config.identity));
        if identity.is_empty() {
            warn!("[runtime] No subject tokens configured; customer endpoints will reject every request");
        }

        ApiGatewayService::new(
            config.clone(),
            self.container.shipments.clone(),
            self.container.quotes.clone(),
            identity,
        )
        .context("failed to build API gateway")
    }

    /// Run until `signal` resolves or the gateway stops on its own.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to the gateway and the notification worker
    /// 2. Let in-flight requests and queued notifications drain (bounded)
    /// 3. Exit
    pub async fn run_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("===========================================");
        info!("  Heritage Shipping Runtime v{}", crate::VERSION);
        info!("===========================================");

        let subscription = self.container.bus.subscribe(EventFilter::all());
        let dispatcher = NotificationDispatcher::new(
            subscription,
            Arc::new(LogSink),
            self.container.config.notifier.clone(),
        );
        let mut notifier = tokio::spawn(dispatcher.run(self.shutdown_rx.clone()));

        let gateway = self.gateway()?;
        info!(
            public = %gateway.config().http_addr(),
            admin = %gateway.config().admin_addr(),
            storage = ?self.container.config.storage.backend,
            "[runtime] Starting listeners"
        );
        let mut server = tokio::spawn(gateway.run(self.shutdown_rx.clone()));

        let outcome = tokio::select! {
            () = signal => {
                info!("[runtime] Shutdown requested");
                Ok(())
            }
            joined = &mut server => match joined {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(anyhow::Error::new(e).context("API gateway failed")),
                Err(e) => Err(anyhow::Error::new(e).context("API gateway task panicked")),
            },
        };

        self.shutdown();

        if !server.is_finished() {
            match tokio::time::timeout(DRAIN_TIMEOUT, &mut server).await {
                Ok(Ok(Err(e))) => error!(error = %e, "[runtime] Gateway stopped with error"),
                Err(_) => warn!("[runtime] Gateway did not stop within drain timeout"),
                _ => {}
            }
        }
        if tokio::time::timeout(DRAIN_TIMEOUT, &mut notifier).await.is_err() {
            warn!("[runtime] Notifier did not stop within drain timeout");
        }

        info!("[runtime] Shutdown complete");
        outcome
    }

    /// Signal every worker to stop.
    fn shutdown(&self) {
        if let Err(e) = self.shutdown_tx.send(true) {
            // All receivers gone: workers already stopped.
            info!("[runtime] Shutdown signal had no listeners: {e}");
        }
    }
}
