//! # Domain Invariants
//!
//! Properties every stored shipment satisfies after every commit.

use super::entities::{Shipment, ShipmentUpdate};
use rust_decimal::Decimal;

/// `actual_delivery` is set iff the shipment is delivered.
pub fn invariant_delivery_consistency(shipment: &Shipment) -> bool {
    shipment.is_delivered() == shipment.actual_delivery.is_some()
}

/// `resume_status` is set iff the shipment sits in a side state, and always
/// names an in-flow, non-terminal status.
pub fn invariant_resume_consistency(shipment: &Shipment) -> bool {
    match shipment.resume_status {
        Some(resume) => {
            shipment.status.is_side_state() && !resume.is_side_state() && !resume.is_terminal()
        }
        None => !shipment.status.is_side_state(),
    }
}

/// Weight > 0.
pub fn invariant_positive_weight(shipment: &Shipment) -> bool {
    shipment.weight > Decimal::ZERO
}

/// Update sequences are exactly `0..len` in append order.
pub fn invariant_contiguous_history(updates: &[ShipmentUpdate]) -> bool {
    let mut sequences: Vec<u32> = updates.iter().map(|u| u.sequence).collect();
    sequences.sort_unstable();
    sequences.iter().enumerate().all(|(i, s)| *s as usize == i)
}

/// All single-record invariants.
pub fn check_shipment(shipment: &Shipment) -> bool {
    invariant_delivery_consistency(shipment)
        && invariant_resume_consistency(shipment)
        && invariant_positive_weight(shipment)
}
