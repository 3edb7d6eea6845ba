//! # Ports Module

pub mod inbound;
pub mod outbound;

pub use inbound::ShipmentLedgerApi;
pub use outbound::{ShipmentRecord, ShipmentRepository};
