//! Wired components: event bus, repositories and both ledgers.

use super::config::RuntimeConfig;
use crate::adapters::Repositories;
use hs_01_identifiers::RandomIdentifierGenerator;
use hs_02_shipment_ledger::{ShipmentLedger, ShipmentLedgerDependencies};
use hs_03_quote_ledger::{QuoteLedger, QuoteLedgerDependencies};
use shared_bus::InMemoryEventBus;
use shared_types::{RepositoryError, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::info;

/// Ledgers and the bus they announce to.
pub struct ShippingContainer {
    pub config: RuntimeConfig,
    pub bus: Arc<InMemoryEventBus>,
    pub shipments: Arc<ShipmentLedger>,
    pub quotes: Arc<QuoteLedger>,
}

impl ShippingContainer {
    /// Open storage and build the ledgers.
    pub fn new(config: RuntimeConfig) -> Result<Self, RepositoryError> {
        let repositories = Repositories::open(&config.storage)?;
        Ok(Self::with_repositories(config, repositories))
    }

    /// Build the ledgers over already opened repositories.
    pub fn with_repositories(config: RuntimeConfig, repositories: Repositories) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(
            config.notifier.channel_capacity,
        ));
        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);
        let generator = Arc::new(RandomIdentifierGenerator::new());

        let shipments = Arc::new(ShipmentLedger::new(
            ShipmentLedgerDependencies {
                repository: repositories.shipments,
                generator: generator.clone(),
                notifier: bus.clone(),
                clock: Arc::clone(&clock),
            },
            config.identifiers.clone(),
            config.shipments.clone(),
        ));

        let quotes = Arc::new(QuoteLedger::new(
            QuoteLedgerDependencies {
                repository: repositories.quotes,
                generator,
                notifier: bus.clone(),
                clock,
            },
            config.identifiers.clone(),
            config.quotes.clone(),
        ));

        info!(
            tracking_prefix = %config.identifiers.tracking_prefix,
            quote_prefix = %config.identifiers.quote_prefix,
            "[runtime] Ledgers initialized"
        );

        Self {
            config,
            bus,
            shipments,
            quotes,
        }
    }
}
