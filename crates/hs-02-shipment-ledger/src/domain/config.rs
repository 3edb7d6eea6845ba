//! # Ledger Configuration

use serde::{Deserialize, Serialize};

/// Default number of re-read-and-retry rounds after a version conflict.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Shipment ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentLedgerConfig {
    /// Retries after the first attempt loses a version race.
    pub max_conflict_retries: u32,
}

impl Default for ShipmentLedgerConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl ShipmentLedgerConfig {
    /// No retries: the first lost race surfaces as `Conflict`.
    pub fn for_testing() -> Self {
        Self {
            max_conflict_retries: 0,
        }
    }
}
