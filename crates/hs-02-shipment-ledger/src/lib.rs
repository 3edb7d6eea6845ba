//! # HS-02 Shipment Ledger
//!
//! Shipment records, the status state machine and the append-only update
//! history.
//!
//! **Component ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Operations
//!
//! | Operation | Caller | Errors |
//! |-----------|--------|--------|
//! | `create` | admin | Validation, GenerationExhausted |
//! | `transition` | admin | Validation, NotFound, InvalidTransition, Conflict |
//! | `get` | subject or admin | NotFound |
//! | `list_for_owner` | subject | - |
//! | `detach_vessel` | admin | - |
//!
//! ## Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | Tracking numbers never reused | repository uniqueness + [`hs_01_identifiers::generate_with_retry`] |
//! | `actual_delivery` set iff delivered | `transition` |
//! | Weight > 0 | `validate_new_shipment` |
//! | No move out of `delivered` | `plan_transition` |
//! | No lost or contradictory updates | versioned commits, re-read on conflict |
//!
//! ## Module Structure
//!
//! ```text
//! hs-02-shipment-ledger/
//! ├── domain/     # Shipment, ShipmentUpdate, state machine, validation
//! ├── ports/      # ShipmentLedgerApi (inbound), ShipmentRepository (outbound)
//! ├── adapters/   # InMemoryShipmentRepository
//! └── service.rs  # ShipmentLedger
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryShipmentRepository;
pub use domain::{
    allowed_targets, plan_transition, NewShipment, Shipment, ShipmentError, ShipmentLedgerConfig,
    ShipmentUpdate, TrackedShipment, TransitionRequest, VesselRef, SHIPMENT_NOT_FOUND,
};
pub use ports::{ShipmentLedgerApi, ShipmentRecord, ShipmentRepository};
pub use service::{ShipmentLedger, ShipmentLedgerDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
