//! # Status State Machine
//!
//! ```text
//!                 ┌──────────┐
//!  pending ──→ in_transit ⇄ customs
//!                 │          │
//!                 └──→ out_for_delivery ──→ delivered (terminal)
//!
//!  any non-terminal ──→ delayed ⇄ exception ──→ back to resume_status
//! ```
//!
//! Evaluation is pure: it reads the current status and the requested one and
//! returns a [`TransitionPlan`] without touching any record.

use shared_types::ShipmentStatus;

use ShipmentStatus::*;

/// Forward edges of the in-flow path.
pub const IN_FLOW_EDGES: [(ShipmentStatus, ShipmentStatus); 6] = [
    (Pending, InTransit),
    (InTransit, Customs),
    (Customs, InTransit),
    (InTransit, OutForDelivery),
    (Customs, OutForDelivery),
    (OutForDelivery, Delivered),
];

/// Outcome of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
    /// `resume_status` to store after the move.
    pub resume_status: Option<ShipmentStatus>,
}

impl TransitionPlan {
    /// The move lands in the terminal status.
    pub fn delivers(&self) -> bool {
        self.to.is_terminal()
    }

    /// Status unchanged; the update only records a new position.
    pub fn is_position_report(&self) -> bool {
        self.from == self.to
    }
}

/// Rejected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disallowed {
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
}

/// Decide whether `from → to` is allowed given the stored `resume_status`.
pub fn plan_transition(
    from: ShipmentStatus,
    resume_status: Option<ShipmentStatus>,
    to: ShipmentStatus,
) -> Result<TransitionPlan, Disallowed> {
    let disallowed = Disallowed { from, to };

    if from.is_terminal() {
        return Err(disallowed);
    }

    let resume_status = if from == to {
        resume_status
    } else if from.is_side_state() {
        if to.is_side_state() {
            resume_status
        } else if resume_status == Some(to) {
            None
        } else {
            return Err(disallowed);
        }
    } else if to.is_side_state() {
        Some(from)
    } else if IN_FLOW_EDGES.contains(&(from, to)) {
        None
    } else {
        return Err(disallowed);
    };

    Ok(TransitionPlan {
        from,
        to,
        resume_status,
    })
}

/// Every status reachable from `from` in one step.
pub fn allowed_targets(
    from: ShipmentStatus,
    resume_status: Option<ShipmentStatus>,
) -> Vec<ShipmentStatus> {
    ShipmentStatus::ALL
        .into_iter()
        .filter(|to| plan_transition(from, resume_status, *to).is_ok())
        .collect()
}
