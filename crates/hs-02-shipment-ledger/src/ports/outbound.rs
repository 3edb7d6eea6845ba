//! # Outbound Ports (Driven Ports)
//!
//! Persistence for shipments and their history.

use crate::domain::{Shipment, ShipmentUpdate, VesselRef};
use hs_01_identifiers::Identifier;
use shared_types::{RepositoryError, SubjectId, Timestamp, Versioned};

/// A stored shipment and its history in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    pub shipment: Versioned<Shipment>,
    pub updates: Vec<ShipmentUpdate>,
}

/// Shipment store - outbound port.
///
/// Implementations enforce two constraints themselves:
///
/// - `insert` refuses a tracking number that already exists
///   (`RepositoryError::Duplicate`), so concurrent creators cannot both win.
/// - `commit_transition` writes only if the stored version still equals
///   `expected_version` (`RepositoryError::Conflict` otherwise), and writes
///   the new shipment state and the appended update together.
pub trait ShipmentRepository: Send + Sync {
    /// Store a new shipment at the initial version.
    fn insert(&self, shipment: Shipment) -> Result<Versioned<Shipment>, RepositoryError>;

    /// Fetch a shipment and its history.
    fn get(&self, tracking_number: &Identifier) -> Result<Option<ShipmentRecord>, RepositoryError>;

    /// Replace the shipment and append `update`, guarded by version.
    ///
    /// Returns the new version.
    fn commit_transition(
        &self,
        shipment: Shipment,
        update: ShipmentUpdate,
        expected_version: u64,
    ) -> Result<u64, RepositoryError>;

    /// Shipments owned by `owner`, in creation order.
    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Shipment>, RepositoryError>;

    /// Clear `vessel` from every shipment referencing it.
    ///
    /// Returns how many shipments were touched.
    fn clear_vessel(&self, vessel: &VesselRef, at: Timestamp) -> Result<usize, RepositoryError>;
}
