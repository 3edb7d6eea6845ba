//! # Identifier Configuration

use super::errors::IdentifierConfigError;
use super::value_objects::IdentifierPrefix;
use serde::{Deserialize, Serialize};

/// Default bound on generate-and-persist attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Identifier generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Prefix for shipment tracking numbers.
    pub tracking_prefix: IdentifierPrefix,
    /// Prefix for quote numbers.
    pub quote_prefix: IdentifierPrefix,
    /// Attempts before giving up with `GenerationExhausted`.
    pub max_attempts: u32,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            tracking_prefix: IdentifierPrefix::tracking(),
            quote_prefix: IdentifierPrefix::quote(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl IdentifierConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), IdentifierConfigError> {
        if self.tracking_prefix == self.quote_prefix {
            return Err(IdentifierConfigError::SamePrefixes(
                self.tracking_prefix.to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(IdentifierConfigError::ZeroAttempts);
        }
        Ok(())
    }
}
