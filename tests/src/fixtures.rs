//! # Test Fixtures
//!
//! Wired ledgers over in-memory repositories, a settable clock and a
//! scripted or random identifier generator.

use chrono::{NaiveDate, TimeZone, Utc};
use hs_01_identifiers::{
    IdentifierConfig, IdentifierGenerator, RandomIdentifierGenerator, ScriptedIdentifierGenerator,
};
use hs_02_shipment_ledger::{
    InMemoryShipmentRepository, NewShipment, ShipmentLedger, ShipmentLedgerConfig,
    ShipmentLedgerDependencies,
};
use hs_03_quote_ledger::{
    InMemoryQuoteRepository, NewQuoteRequest, QuoteLedger, QuoteLedgerConfig,
    QuoteLedgerDependencies,
};
use hs_04_access_gate::{admin_grant, AdminGrant};
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use shared_bus::{DeliveryError, InMemoryEventBus, Notification, NotificationSink};
use shared_types::{Caller, CargoType, MockTimeSource, ServiceType, SubjectId, Timestamp};
use std::sync::Arc;

/// Fixed start of every test clock: 2024-09-01T00:00:00Z.
pub fn start() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Administrative capability, as the admin listener would obtain it.
pub fn admin() -> AdminGrant {
    admin_grant(&Caller::Admin).expect("administrator always receives a grant")
}

pub fn subject(handle: &str) -> Caller {
    Caller::Subject(SubjectId::new(handle))
}

/// Both ledgers wired over shared infrastructure.
pub struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<MockTimeSource>,
    pub shipment_repo: Arc<InMemoryShipmentRepository>,
    pub quote_repo: Arc<InMemoryQuoteRepository>,
    pub shipments: Arc<ShipmentLedger>,
    pub quotes: Arc<QuoteLedger>,
}

impl Harness {
    /// Counting generators starting at 1: `HS00000001`, `HQ00000001`, ...
    pub fn new() -> Self {
        Self::with_generators(
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
        )
    }

    /// Production generator.
    pub fn random() -> Self {
        let generator = Arc::new(RandomIdentifierGenerator::new());
        Self::with_generators(generator.clone(), generator)
    }

    pub fn with_generators(
        shipment_ids: Arc<dyn IdentifierGenerator>,
        quote_ids: Arc<dyn IdentifierGenerator>,
    ) -> Self {
        Self::build(
            shipment_ids,
            quote_ids,
            ShipmentLedgerConfig::default(),
            QuoteLedgerConfig::default(),
        )
    }

    pub fn build(
        shipment_ids: Arc<dyn IdentifierGenerator>,
        quote_ids: Arc<dyn IdentifierGenerator>,
        shipment_config: ShipmentLedgerConfig,
        quote_config: QuoteLedgerConfig,
    ) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(MockTimeSource::new(start()));
        let shipment_repo = Arc::new(InMemoryShipmentRepository::new());
        let quote_repo = Arc::new(InMemoryQuoteRepository::new());

        let shipments = Arc::new(ShipmentLedger::new(
            ShipmentLedgerDependencies {
                repository: shipment_repo.clone(),
                generator: shipment_ids,
                notifier: bus.clone(),
                clock: clock.clone(),
            },
            IdentifierConfig::default(),
            shipment_config,
        ));
        let quotes = Arc::new(QuoteLedger::new(
            QuoteLedgerDependencies {
                repository: quote_repo.clone(),
                generator: quote_ids,
                notifier: bus.clone(),
                clock: clock.clone(),
            },
            IdentifierConfig::default(),
            quote_config,
        ));

        Self {
            bus,
            clock,
            shipment_repo,
            quote_repo,
            shipments,
            quotes,
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete booking, optionally owned.
pub fn new_shipment(owner: Option<&str>) -> NewShipment {
    NewShipment {
        owner: owner.map(SubjectId::new),
        sender_name: "Acme Exports".into(),
        sender_address: "1 Harbour Rd, Shanghai".into(),
        recipient_name: "Rotterdam Imports BV".into(),
        recipient_address: "Wilhelminakade 1, Rotterdam".into(),
        origin_port: "Shanghai".into(),
        destination_port: "Rotterdam".into(),
        vessel: None,
        weight: dec!(1200.50),
        dimensions: "40ft container".into(),
        cargo_type: "Container".into(),
        estimated_delivery: Some(start() + chrono::Duration::days(30)),
    }
}

/// A complete quote submission with weight 1200.5.
pub fn new_quote() -> NewQuoteRequest {
    NewQuoteRequest {
        company_name: "Acme Ltd".into(),
        contact_name: "Jane Doe".into(),
        email: "jane@acme.example".into(),
        phone: "+44 20 7946 0000".into(),
        service_type: Some(ServiceType::OceanFreight),
        cargo_type: Some(CargoType::Container),
        origin_port: "Felixstowe".into(),
        destination_port: "Singapore".into(),
        cargo_description: "Machine parts".into(),
        weight: dec!(1200.5),
        dimensions: "2x 40ft".into(),
        estimated_value: Some(dec!(250000.00)),
        preferred_shipping_date: NaiveDate::from_ymd_opt(2024, 10, 1),
        special_requirements: String::new(),
    }
}

/// Sink that remembers everything it was given.
#[derive(Default)]
pub struct RecordingSink {
    pub seen: Mutex<Vec<Notification>>,
}

#[async_trait::async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.seen.lock().push(notification.clone());
        Ok(())
    }
}

/// Sink whose every delivery fails.
pub struct FailingSink;

#[async_trait::async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(&self, _notification: &Notification) -> Result<(), DeliveryError> {
        Err(DeliveryError::Unavailable("smtp relay unreachable".into()))
    }
}
