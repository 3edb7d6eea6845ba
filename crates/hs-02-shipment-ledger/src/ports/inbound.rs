//! # Inbound Ports (Driving Ports)
//!
//! The API the gateway and operator tooling call.

use crate::domain::{
    NewShipment, Shipment, ShipmentError, ShipmentUpdate, TrackedShipment, TransitionRequest,
};
use async_trait::async_trait;
use hs_04_access_gate::AdminGrant;
use shared_types::{Caller, SubjectId};

/// Primary API for the Shipment Ledger.
///
/// Tracking numbers are taken as plain strings. A malformed one is reported
/// as `NotFound`, like any other unknown number.
#[async_trait]
pub trait ShipmentLedgerApi: Send + Sync {
    /// Book a new `pending` shipment under a fresh tracking number.
    ///
    /// ## Errors
    ///
    /// - `Validation`: missing fields, weight ≤ 0, oversized text
    /// - `GenerationExhausted`: no free tracking number within the retry bound
    async fn create(
        &self,
        grant: &AdminGrant,
        fields: NewShipment,
    ) -> Result<Shipment, ShipmentError>;

    /// Move a shipment through the state machine and append an update.
    ///
    /// Entering `delivered` sets `actual_delivery` to the event time.
    ///
    /// ## Errors
    ///
    /// - `Validation`: location missing or too long
    /// - `NotFound`: unknown tracking number
    /// - `InvalidTransition`: the state machine forbids the move
    /// - `Conflict`: lost the version race on every retry
    async fn transition(
        &self,
        grant: &AdminGrant,
        tracking_number: &str,
        request: TransitionRequest,
    ) -> Result<ShipmentUpdate, ShipmentError>;

    /// Fetch a shipment with its history, newest event first.
    ///
    /// Unknown and foreign shipments both yield `NotFound`.
    async fn get(
        &self,
        caller: &Caller,
        tracking_number: &str,
    ) -> Result<TrackedShipment, ShipmentError>;

    /// Shipments owned by `owner`, in creation order.
    async fn list_for_owner(&self, owner: &SubjectId) -> Result<Vec<Shipment>, ShipmentError>;

    /// Clear a removed vessel from every shipment referencing it.
    async fn detach_vessel(&self, grant: &AdminGrant, vessel: &str)
        -> Result<usize, ShipmentError>;
}
