//! # Input Validation
//!
//! Runs before any identifier is generated or record touched.

use super::entities::{NewShipment, TransitionRequest};
use shared_types::validation::{limit_text, require_positive_decimal, require_text, REQUIRED};
use shared_types::FieldError;

/// Names, ports, dimensions, location.
pub const MAX_TEXT_LEN: usize = 100;
pub const MAX_CARGO_TYPE_LEN: usize = 50;
pub const WEIGHT_DIGITS: u32 = 10;
pub const WEIGHT_PLACES: u32 = 2;

/// Field errors for a booking; empty when valid.
pub fn validate_new_shipment(fields: &NewShipment) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "sender_name", &fields.sender_name, MAX_TEXT_LEN);
    require_text(&mut errors, "sender_address", &fields.sender_address, usize::MAX);
    require_text(&mut errors, "recipient_name", &fields.recipient_name, MAX_TEXT_LEN);
    require_text(&mut errors, "recipient_address", &fields.recipient_address, usize::MAX);
    require_text(&mut errors, "origin_port", &fields.origin_port, MAX_TEXT_LEN);
    require_text(&mut errors, "destination_port", &fields.destination_port, MAX_TEXT_LEN);
    require_text(&mut errors, "dimensions", &fields.dimensions, MAX_TEXT_LEN);
    require_text(&mut errors, "cargo_type", &fields.cargo_type, MAX_CARGO_TYPE_LEN);
    if let Some(vessel) = &fields.vessel {
        limit_text(&mut errors, "vessel", vessel, MAX_TEXT_LEN);
    }
    require_positive_decimal(&mut errors, "weight", fields.weight, WEIGHT_DIGITS, WEIGHT_PLACES);
    if fields.estimated_delivery.is_none() {
        errors.push(FieldError::new("estimated_delivery", REQUIRED));
    }

    errors
}

/// Field errors for a transition request; empty when valid.
pub fn validate_transition(request: &TransitionRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require_text(&mut errors, "location", &request.location, MAX_TEXT_LEN);
    errors
}
