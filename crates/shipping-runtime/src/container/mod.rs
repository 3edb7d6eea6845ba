//! # Component Container
//!
//! Holds the wired ledgers and the event bus they publish to.
//!
//! ## Initialization Order
//!
//! 1. Event bus
//! 2. Repositories for the configured backend
//! 3. Shipment and quote ledgers (random identifiers, system clock)

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, LoggingConfig, RuntimeConfig, StorageBackend, StorageConfig};
pub use subsystems::ShippingContainer;
