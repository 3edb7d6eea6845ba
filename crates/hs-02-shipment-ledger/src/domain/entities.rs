//! # Domain Entities
//!
//! Shipments, their update history, and the inputs that create or move them.

use hs_01_identifiers::Identifier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{ShipmentStatus, SubjectId, Timestamp};
use std::fmt;

/// Weak reference to a vessel in the content catalog.
///
/// Removing the vessel clears the reference on every shipment that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselRef(String);

impl VesselRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VesselRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A booked shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique, never reused.
    pub tracking_number: Identifier,
    /// `None` for anonymous or manual bookings.
    pub owner: Option<SubjectId>,
    pub sender_name: String,
    pub sender_address: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub origin_port: String,
    pub destination_port: String,
    pub vessel: Option<VesselRef>,
    /// Always > 0.
    pub weight: Decimal,
    pub dimensions: String,
    pub cargo_type: String,
    pub status: ShipmentStatus,
    /// In-flow status to return to from `delayed` or `exception`.
    pub resume_status: Option<ShipmentStatus>,
    pub estimated_delivery: Timestamp,
    /// Set iff `status == Delivered`.
    pub actual_delivery: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shipment {
    /// A fresh `pending` shipment under `tracking_number`.
    pub fn book(tracking_number: Identifier, fields: &NewShipment, now: Timestamp) -> Self {
        Self {
            tracking_number,
            owner: fields.owner.clone(),
            sender_name: fields.sender_name.trim().to_string(),
            sender_address: fields.sender_address.trim().to_string(),
            recipient_name: fields.recipient_name.trim().to_string(),
            recipient_address: fields.recipient_address.trim().to_string(),
            origin_port: fields.origin_port.trim().to_string(),
            destination_port: fields.destination_port.trim().to_string(),
            vessel: fields
                .vessel
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(VesselRef::new),
            weight: fields.weight,
            dimensions: fields.dimensions.trim().to_string(),
            cargo_type: fields.cargo_type.trim().to_string(),
            status: ShipmentStatus::Pending,
            resume_status: None,
            estimated_delivery: fields.estimated_delivery.unwrap_or(now),
            actual_delivery: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status == ShipmentStatus::Delivered
    }
}

/// One entry in a shipment's append-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentUpdate {
    /// 0-based position in append order.
    pub sequence: u32,
    pub location: String,
    /// Status snapshot at the time of the update.
    pub status: ShipmentStatus,
    pub description: String,
    /// Real-world event time; may be backdated.
    pub timestamp: Timestamp,
    /// When the update was recorded.
    pub recorded_at: Timestamp,
}

/// Fields for booking a shipment.
///
/// Every field defaults so that missing input surfaces as a field-level
/// validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewShipment {
    pub owner: Option<SubjectId>,
    pub sender_name: String,
    pub sender_address: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub origin_port: String,
    pub destination_port: String,
    pub vessel: Option<String>,
    pub weight: Decimal,
    pub dimensions: String,
    pub cargo_type: String,
    pub estimated_delivery: Option<Timestamp>,
}

/// Request to move a shipment to `status`, or report a new position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub status: ShipmentStatus,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to the time the transition is recorded.
    #[serde(default)]
    pub event_time: Option<Timestamp>,
}

impl TransitionRequest {
    pub fn new(status: ShipmentStatus, location: impl Into<String>) -> Self {
        Self {
            status,
            location: location.into(),
            description: String::new(),
            event_time: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn at(mut self, event_time: Timestamp) -> Self {
        self.event_time = Some(event_time);
        self
    }
}

/// A shipment with its history, most recent event first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedShipment {
    pub shipment: Shipment,
    pub updates: Vec<ShipmentUpdate>,
}

impl TrackedShipment {
    /// Order `updates` by event time descending, newest append first on ties.
    pub fn new(shipment: Shipment, mut updates: Vec<ShipmentUpdate>) -> Self {
        updates.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        Self { shipment, updates }
    }
}
