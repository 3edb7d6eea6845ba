//! # Core Domain Entities
//!
//! Types that cross component boundaries.
//!
//! ## Clusters
//!
//! - **Identity**: [`SubjectId`], [`Caller`]
//! - **Shipments**: [`ShipmentStatus`]
//! - **Quotes**: [`ServiceType`], [`CargoType`]
//! - **Validation & Storage**: [`FieldError`], [`Versioned`]

use crate::errors::ParseEnumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wall-clock instant used for every record and event timestamp.
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Opaque handle for an authenticated subject, as issued by the identity
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Wrap a handle issued by the identity provider.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is invoking a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "subject")]
pub enum Caller {
    /// An authenticated customer.
    Subject(SubjectId),
    /// Operator tooling or an internal task queue.
    Admin,
}

impl Caller {
    /// Caller for an authenticated subject.
    pub fn subject(handle: impl Into<String>) -> Self {
        Self::Subject(SubjectId::new(handle))
    }

    /// The subject handle, if this is not an administrative caller.
    pub fn subject_id(&self) -> Option<&SubjectId> {
        match self {
            Self::Subject(id) => Some(id),
            Self::Admin => None,
        }
    }

    /// Whether this caller holds administrative rights.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

// =============================================================================
// CLUSTER B: SHIPMENTS
// =============================================================================

/// Shipment status.
///
/// In-flow: `Pending → InTransit ⇄ Customs → OutForDelivery → Delivered`.
/// `Delayed` and `Exception` are side states entered from any non-terminal
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Booked, not yet moving.
    #[default]
    Pending,
    /// Moving between ports.
    InTransit,
    /// Held for customs clearance.
    Customs,
    /// On the last leg to the recipient.
    OutForDelivery,
    /// Handed over. Terminal.
    Delivered,
    /// Side state: behind schedule.
    Delayed,
    /// Side state: something went wrong and needs attention.
    Exception,
}

impl ShipmentStatus {
    /// Every status, in-flow order first.
    pub const ALL: [ShipmentStatus; 7] = [
        Self::Pending,
        Self::InTransit,
        Self::Customs,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Delayed,
        Self::Exception,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Customs => "customs",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Delayed => "delayed",
            Self::Exception => "exception",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Customs => "In Customs",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Delayed => "Delayed",
            Self::Exception => "Exception",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// `Delayed` or `Exception`.
    pub fn is_side_state(&self) -> bool {
        matches!(self, Self::Delayed | Self::Exception)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("shipment status", s))
    }
}

// =============================================================================
// CLUSTER C: QUOTES
// =============================================================================

/// Freight service requested in a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    OceanFreight,
    AirFreight,
    LandTransport,
    Warehousing,
    Customs,
    Multimodal,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        Self::OceanFreight,
        Self::AirFreight,
        Self::LandTransport,
        Self::Warehousing,
        Self::Customs,
        Self::Multimodal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OceanFreight => "ocean_freight",
            Self::AirFreight => "air_freight",
            Self::LandTransport => "land_transport",
            Self::Warehousing => "warehousing",
            Self::Customs => "customs",
            Self::Multimodal => "multimodal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OceanFreight => "Ocean Freight",
            Self::AirFreight => "Air Freight",
            Self::LandTransport => "Land Transport",
            Self::Warehousing => "Warehousing",
            Self::Customs => "Customs Clearance",
            Self::Multimodal => "Multimodal Transport",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("service type", s))
    }
}

/// Cargo category in a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoType {
    Container,
    Bulk,
    Breakbulk,
    Roro,
    Liquid,
    Hazardous,
}

impl CargoType {
    pub const ALL: [CargoType; 6] = [
        Self::Container,
        Self::Bulk,
        Self::Breakbulk,
        Self::Roro,
        Self::Liquid,
        Self::Hazardous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Bulk => "bulk",
            Self::Breakbulk => "breakbulk",
            Self::Roro => "roro",
            Self::Liquid => "liquid",
            Self::Hazardous => "hazardous",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Bulk => "Bulk Cargo",
            Self::Breakbulk => "Break Bulk",
            Self::Roro => "Roll-on/Roll-off",
            Self::Liquid => "Liquid Cargo",
            Self::Hazardous => "Hazardous Materials",
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CargoType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cargo| cargo.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("cargo type", s))
    }
}

// =============================================================================
// CLUSTER D: VALIDATION & STORAGE
// =============================================================================

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears on the wire.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A stored record together with its optimistic-concurrency version.
///
/// Versions start at 1 on insert and increase by one on every commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub record: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    /// Version assigned to a freshly inserted record.
    pub const INITIAL_VERSION: u64 = 1;

    pub fn new(record: T, version: u64) -> Self {
        Self { record, version }
    }

    pub fn initial(record: T) -> Self {
        Self::new(record, Self::INITIAL_VERSION)
    }
}
