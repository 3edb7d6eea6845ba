//! # Shipping Events
//!
//! Everything the ledgers announce after a commit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{ServiceType, ShipmentStatus, SubjectId, Timestamp};

/// All events that can be published to the notifier bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShippingEvent {
    // =========================================================================
    // QUOTE LEDGER (hs-03)
    // =========================================================================
    /// A customer submitted a quote request.
    QuoteSubmitted {
        quote_number: String,
        owner: SubjectId,
        company_name: String,
        contact_name: String,
        email: String,
        service_type: ServiceType,
        origin_port: String,
        destination_port: String,
        submitted_at: Timestamp,
    },

    /// An operator priced a quote request.
    QuoteProcessed {
        quote_number: String,
        owner: SubjectId,
        email: String,
        quoted_price: Decimal,
        processed_at: Timestamp,
    },

    // =========================================================================
    // SHIPMENT LEDGER (hs-02)
    // =========================================================================
    /// An operator booked a new shipment.
    ShipmentCreated {
        tracking_number: String,
        owner: Option<SubjectId>,
        origin_port: String,
        destination_port: String,
        estimated_delivery: Timestamp,
    },

    /// A status transition was committed.
    ShipmentStatusChanged {
        tracking_number: String,
        owner: Option<SubjectId>,
        from: ShipmentStatus,
        to: ShipmentStatus,
        location: String,
        event_time: Timestamp,
    },
}

impl ShippingEvent {
    /// Topic used for filtering.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::QuoteSubmitted { .. } | Self::QuoteProcessed { .. } => EventTopic::Quotes,
            Self::ShipmentCreated { .. } | Self::ShipmentStatusChanged { .. } => {
                EventTopic::Shipments
            }
        }
    }

    /// Component that emitted the event.
    #[must_use]
    pub fn source_component(&self) -> &'static str {
        match self.topic() {
            EventTopic::Quotes => "hs-03",
            _ => "hs-02",
        }
    }

    /// Tracking or quote number the event is about.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::QuoteSubmitted { quote_number, .. } | Self::QuoteProcessed { quote_number, .. } => {
                quote_number
            }
            Self::ShipmentCreated {
                tracking_number, ..
            }
            | Self::ShipmentStatusChanged {
                tracking_number, ..
            } => tracking_number,
        }
    }
}

/// Event topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Quote submissions and processing.
    Quotes,
    /// Shipment bookings and status changes.
    Shipments,
    /// Wildcard.
    All,
}

/// Filter for subscriptions. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn matches(&self, event: &ShippingEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
