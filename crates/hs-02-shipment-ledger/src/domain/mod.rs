//! # Domain Module
//!
//! Shipment entities, the status state machine, validation and errors.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod lifecycle;
pub mod validation;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use lifecycle::{allowed_targets, plan_transition, Disallowed, TransitionPlan, IN_FLOW_EDGES};
pub use validation::{validate_new_shipment, validate_transition};
