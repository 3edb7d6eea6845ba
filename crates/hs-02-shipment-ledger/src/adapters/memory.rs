//! In-memory shipment repository.
//!
//! Default backend for tests and single-process deployments. One write lock
//! covers each check-and-commit, which gives the same guarantees a
//! transactional store gives with a unique index and a version column.

use crate::domain::{Shipment, ShipmentUpdate, VesselRef};
use crate::ports::{ShipmentRecord, ShipmentRepository};
use hs_01_identifiers::Identifier;
use parking_lot::RwLock;
use shared_types::{RepositoryError, SubjectId, Timestamp, Versioned};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct State {
    records: HashMap<Identifier, ShipmentRecord>,
    /// Tracking numbers in insertion order.
    order: Vec<Identifier>,
}

/// In-memory shipment store.
#[derive(Default)]
pub struct InMemoryShipmentRepository {
    state: RwLock<State>,
}

impl InMemoryShipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shipments.
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ShipmentRepository for InMemoryShipmentRepository {
    fn insert(&self, shipment: Shipment) -> Result<Versioned<Shipment>, RepositoryError> {
        let mut state = self.state.write();
        let id = shipment.tracking_number.clone();
        if state.records.contains_key(&id) {
            return Err(RepositoryError::Duplicate(id.into_string()));
        }

        let stored = Versioned::initial(shipment);
        state.records.insert(
            id.clone(),
            ShipmentRecord {
                shipment: stored.clone(),
                updates: Vec::new(),
            },
        );
        state.order.push(id);
        Ok(stored)
    }

    fn get(&self, tracking_number: &Identifier) -> Result<Option<ShipmentRecord>, RepositoryError> {
        Ok(self.state.read().records.get(tracking_number).cloned())
    }

    fn commit_transition(
        &self,
        shipment: Shipment,
        update: ShipmentUpdate,
        expected_version: u64,
    ) -> Result<u64, RepositoryError> {
        let mut state = self.state.write();
        let id = shipment.tracking_number.clone();
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if record.shipment.version != expected_version {
            debug!(
                id = %id,
                expected = expected_version,
                actual = record.shipment.version,
                "[hs-02] Version conflict on commit"
            );
            return Err(RepositoryError::Conflict {
                id: id.into_string(),
                expected: expected_version,
                actual: record.shipment.version,
            });
        }

        let version = expected_version + 1;
        record.shipment = Versioned::new(shipment, version);
        record.updates.push(update);
        Ok(version)
    }

    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Shipment>, RepositoryError> {
        let state = self.state.read();
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.records.get(id))
            .filter(|r| r.shipment.record.owner.as_ref() == Some(owner))
            .map(|r| r.shipment.record.clone())
            .collect())
    }

    fn clear_vessel(&self, vessel: &VesselRef, at: Timestamp) -> Result<usize, RepositoryError> {
        let mut state = self.state.write();
        let mut cleared = 0;
        for record in state.records.values_mut() {
            if record.shipment.record.vessel.as_ref() == Some(vessel) {
                record.shipment.record.vessel = None;
                record.shipment.record.updated_at = at;
                record.shipment.version += 1;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}
