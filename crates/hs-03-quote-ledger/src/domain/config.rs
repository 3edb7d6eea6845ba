//! # Ledger Configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Quote ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteLedgerConfig {
    /// Retries after the first attempt loses a version race.
    pub max_conflict_retries: u32,
}

impl Default for QuoteLedgerConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl QuoteLedgerConfig {
    pub fn for_testing() -> Self {
        Self {
            max_conflict_retries: 0,
        }
    }
}
