//! # Storage Backends
//!
//! Repositories for the configured [`StorageBackend`].
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to make `HS_STORAGE=rocksdb` available:
//!
//! ```toml
//! shipping-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! Without it, only the in-memory repositories are compiled in.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{
    RocksDbConfig, RocksDbQuoteRepository, RocksDbShipmentRepository, RocksDbStore, CF_OWNERS,
    CF_QUOTES, CF_SHIPMENTS, COLUMN_FAMILIES,
};

use crate::container::config::{StorageBackend, StorageConfig};
use hs_02_shipment_ledger::{InMemoryShipmentRepository, ShipmentRepository};
use hs_03_quote_ledger::{InMemoryQuoteRepository, QuoteRepository};
use shared_types::RepositoryError;
use std::sync::Arc;
use tracing::info;

/// Repository pair for both ledgers.
pub struct Repositories {
    pub shipments: Arc<dyn ShipmentRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
}

impl Repositories {
    /// Fresh in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            shipments: Arc::new(InMemoryShipmentRepository::new()),
            quotes: Arc::new(InMemoryQuoteRepository::new()),
        }
    }

    /// Open the backend named in `config`.
    pub fn open(config: &StorageConfig) -> Result<Self, RepositoryError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("[runtime] Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::RocksDb => open_rocksdb(config),
        }
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StorageConfig) -> Result<Repositories, RepositoryError> {
    let store = Arc::new(RocksDbStore::open(RocksDbConfig::under(&config.data_dir))?);
    Ok(Repositories {
        shipments: Arc::new(RocksDbShipmentRepository::new(Arc::clone(&store))),
        quotes: Arc::new(RocksDbQuoteRepository::new(store)),
    })
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StorageConfig) -> Result<Repositories, RepositoryError> {
    Err(RepositoryError::Backend(
        "RocksDB support not compiled in; rebuild with --features rocksdb".into(),
    ))
}
