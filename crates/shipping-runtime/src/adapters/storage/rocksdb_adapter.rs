//! # RocksDB Storage Adapter
//!
//! Durable implementations of the shipment and quote repositories.
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch) for record + owner index
//! - Column families per record kind
//! - Snappy compression
//! - Bloom filters for point lookups
//!
//! ## Column Families
//!
//! - `shipments` - tracking number → shipment, version and history
//! - `quotes` - quote number → quote request and version
//! - `owners` - `kind | owner | 0x00 | sequence` → identifier, plus the
//!   sequence counter
//!
//! Values are JSON. RocksDB has no compare-and-swap, so every
//! check-and-commit runs under one process-local write mutex.

use hs_01_identifiers::Identifier;
use hs_02_shipment_ledger::{
    Shipment, ShipmentRecord, ShipmentRepository, ShipmentUpdate, VesselRef,
};
use hs_03_quote_ledger::{QuoteRepository, QuoteRequest};
use parking_lot::Mutex;
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, Direction,
    IteratorMode, Options, WriteBatch, WriteOptions, DB,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{RepositoryError, SubjectId, Timestamp, Versioned};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Column family names
pub const CF_SHIPMENTS: &str = "shipments";
pub const CF_QUOTES: &str = "quotes";
pub const CF_OWNERS: &str = "owners";

/// All column families used by the runtime
pub const COLUMN_FAMILIES: &[&str] = &[CF_SHIPMENTS, CF_QUOTES, CF_OWNERS];

/// Owner index kinds.
const KIND_SHIPMENT: u8 = b's';
const KIND_QUOTE: u8 = b'q';

/// Key of the owner-index sequence counter. Sorts after every index key.
const SEQUENCE_KEY: &[u8] = b"\xff\xffsequence";

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
    /// fsync after each write (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            max_write_buffer_number: 3,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Database under `data_dir` with default tuning.
    pub fn under(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join("rocksdb"),
            ..Default::default()
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
            sync_writes: false,
        }
    }
}

/// Shared database handle for both repositories.
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
    write_lock: Mutex<()>,
}

impl RocksDbStore {
    /// Open or create the database
    pub fn open(config: RocksDbConfig) -> Result<Self, RepositoryError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| backend("open", e))?;
        info!(path = %config.path.display(), "[runtime] RocksDB opened");

        Ok(Self {
            db,
            config,
            write_lock: Mutex::new(()),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, RepositoryError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| RepositoryError::Backend(format!("missing column family {name}")))
    }

    fn read<T: DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>, RepositoryError> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key).map_err(|e| backend("get", e))? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| RepositoryError::Backend(format!("decode failed: {e}"))),
            None => Ok(None),
        }
    }

    fn write(&self, batch: WriteBatch) -> Result<(), RepositoryError> {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        self.db
            .write_opt(batch, &write_opts)
            .map_err(|e| backend("write", e))
    }

    /// Next owner-index sequence number. Caller holds the write lock.
    fn next_sequence(&self) -> Result<u64, RepositoryError> {
        let cf = self.cf(CF_OWNERS)?;
        let current = match self.db.get_cf(cf, SEQUENCE_KEY).map_err(|e| backend("get", e))? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| RepositoryError::Backend("corrupt sequence counter".into()))?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        Ok(current + 1)
    }

    /// Add the record and its owner-index entry to `batch`.
    fn stage_insert(
        &self,
        batch: &mut WriteBatch,
        cf_name: &str,
        kind: u8,
        id: &Identifier,
        owner: Option<&SubjectId>,
        value: &[u8],
    ) -> Result<(), RepositoryError> {
        batch.put_cf(self.cf(cf_name)?, id.as_str(), value);
        if let Some(owner) = owner {
            let sequence = self.next_sequence()?;
            let owners = self.cf(CF_OWNERS)?;
            batch.put_cf(owners, owner_key(kind, owner, sequence), id.as_str());
            batch.put_cf(owners, SEQUENCE_KEY, sequence.to_be_bytes());
        }
        Ok(())
    }

    /// Identifiers indexed under `owner`, in insertion order.
    fn owned_ids(&self, kind: u8, owner: &SubjectId) -> Result<Vec<String>, RepositoryError> {
        let cf = self.cf(CF_OWNERS)?;
        let prefix = owner_prefix(kind, owner);
        let mut ids = Vec::new();
        for item in self
            .db
            .iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward))
        {
            let (key, value) = item.map_err(|e| backend("iterate", e))?;
            if !key.starts_with(&prefix) {
                break;
            }
            ids.push(String::from_utf8_lossy(&value).into_owned());
        }
        Ok(ids)
    }
}

fn backend(op: &str, err: rocksdb::Error) -> RepositoryError {
    RepositoryError::Backend(format!("RocksDB {op} failed: {err}"))
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, RepositoryError> {
    serde_json::to_vec(value).map_err(|e| RepositoryError::Backend(format!("encode failed: {e}")))
}

fn owner_prefix(kind: u8, owner: &SubjectId) -> Vec<u8> {
    let mut key = Vec::with_capacity(owner.as_str().len() + 2);
    key.push(kind);
    key.extend_from_slice(owner.as_str().as_bytes());
    key.push(0);
    key
}

fn owner_key(kind: u8, owner: &SubjectId, sequence: u64) -> Vec<u8> {
    let mut key = owner_prefix(kind, owner);
    key.extend_from_slice(&sequence.to_be_bytes());
    key
}

fn conflict(id: &Identifier, expected: u64, actual: u64) -> RepositoryError {
    debug!(id = %id, expected, actual, "[runtime] Version conflict on commit");
    RepositoryError::Conflict {
        id: id.to_string(),
        expected,
        actual,
    }
}

// =============================================================================
// SHIPMENTS
// =============================================================================

#[derive(Serialize, Deserialize)]
struct StoredShipment {
    shipment: Versioned<Shipment>,
    updates: Vec<ShipmentUpdate>,
}

impl From<StoredShipment> for ShipmentRecord {
    fn from(stored: StoredShipment) -> Self {
        Self {
            shipment: stored.shipment,
            updates: stored.updates,
        }
    }
}

/// Shipment repository over [`RocksDbStore`].
pub struct RocksDbShipmentRepository {
    store: Arc<RocksDbStore>,
}

impl RocksDbShipmentRepository {
    pub fn new(store: Arc<RocksDbStore>) -> Self {
        Self { store }
    }
}

impl ShipmentRepository for RocksDbShipmentRepository {
    fn insert(&self, shipment: Shipment) -> Result<Versioned<Shipment>, RepositoryError> {
        let _guard = self.store.write_lock.lock();
        let id = shipment.tracking_number.clone();
        if self
            .store
            .read::<StoredShipment>(CF_SHIPMENTS, id.as_str().as_bytes())?
            .is_some()
        {
            return Err(RepositoryError::Duplicate(id.into_string()));
        }

        let stored = StoredShipment {
            shipment: Versioned::initial(shipment),
            updates: Vec::new(),
        };
        let mut batch = WriteBatch::default();
        self.store.stage_insert(
            &mut batch,
            CF_SHIPMENTS,
            KIND_SHIPMENT,
            &id,
            stored.shipment.record.owner.as_ref(),
            &encode(&stored)?,
        )?;
        self.store.write(batch)?;
        Ok(stored.shipment)
    }

    fn get(&self, tracking_number: &Identifier) -> Result<Option<ShipmentRecord>, RepositoryError> {
        Ok(self
            .store
            .read::<StoredShipment>(CF_SHIPMENTS, tracking_number.as_str().as_bytes())?
            .map(ShipmentRecord::from))
    }

    fn commit_transition(
        &self,
        shipment: Shipment,
        update: ShipmentUpdate,
        expected_version: u64,
    ) -> Result<u64, RepositoryError> {
        let _guard = self.store.write_lock.lock();
        let id = shipment.tracking_number.clone();
        let mut stored = self
            .store
            .read::<StoredShipment>(CF_SHIPMENTS, id.as_str().as_bytes())?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if stored.shipment.version != expected_version {
            return Err(conflict(&id, expected_version, stored.shipment.version));
        }

        let version = expected_version + 1;
        stored.shipment = Versioned::new(shipment, version);
        stored.updates.push(update);

        let mut batch = WriteBatch::default();
        batch.put_cf(self.store.cf(CF_SHIPMENTS)?, id.as_str(), encode(&stored)?);
        self.store.write(batch)?;
        Ok(version)
    }

    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Shipment>, RepositoryError> {
        let mut shipments = Vec::new();
        for id in self.store.owned_ids(KIND_SHIPMENT, owner)? {
            if let Some(stored) = self
                .store
                .read::<StoredShipment>(CF_SHIPMENTS, id.as_bytes())?
            {
                shipments.push(stored.shipment.record);
            }
        }
        Ok(shipments)
    }

    fn clear_vessel(&self, vessel: &VesselRef, at: Timestamp) -> Result<usize, RepositoryError> {
        let _guard = self.store.write_lock.lock();
        let cf = self.store.cf(CF_SHIPMENTS)?;
        let mut batch = WriteBatch::default();
        let mut cleared = 0;

        for item in self.store.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| backend("iterate", e))?;
            let mut stored: StoredShipment = serde_json::from_slice(&value)
                .map_err(|e| RepositoryError::Backend(format!("decode failed: {e}")))?;
            if stored.shipment.record.vessel.as_ref() != Some(vessel) {
                continue;
            }
            stored.shipment.record.vessel = None;
            stored.shipment.record.updated_at = at;
            stored.shipment.version += 1;
            batch.put_cf(cf, key, encode(&stored)?);
            cleared += 1;
        }

        if cleared > 0 {
            self.store.write(batch)?;
        }
        Ok(cleared)
    }
}

// =============================================================================
// QUOTES
// =============================================================================

/// Quote repository over [`RocksDbStore`].
pub struct RocksDbQuoteRepository {
    store: Arc<RocksDbStore>,
}

impl RocksDbQuoteRepository {
    pub fn new(store: Arc<RocksDbStore>) -> Self {
        Self { store }
    }
}

impl QuoteRepository for RocksDbQuoteRepository {
    fn insert(&self, quote: QuoteRequest) -> Result<Versioned<QuoteRequest>, RepositoryError> {
        let _guard = self.store.write_lock.lock();
        let id = quote.quote_number.clone();
        if self
            .store
            .read::<Versioned<QuoteRequest>>(CF_QUOTES, id.as_str().as_bytes())?
            .is_some()
        {
            return Err(RepositoryError::Duplicate(id.into_string()));
        }

        let stored = Versioned::initial(quote);
        let mut batch = WriteBatch::default();
        self.store.stage_insert(
            &mut batch,
            CF_QUOTES,
            KIND_QUOTE,
            &id,
            Some(&stored.record.owner),
            &encode(&stored)?,
        )?;
        self.store.write(batch)?;
        Ok(stored)
    }

    fn get(
        &self,
        quote_number: &Identifier,
    ) -> Result<Option<Versioned<QuoteRequest>>, RepositoryError> {
        self.store.read(CF_QUOTES, quote_number.as_str().as_bytes())
    }

    fn commit(&self, quote: QuoteRequest, expected_version: u64) -> Result<u64, RepositoryError> {
        let _guard = self.store.write_lock.lock();
        let id = quote.quote_number.clone();
        let stored: Versioned<QuoteRequest> = self
            .store
            .read(CF_QUOTES, id.as_str().as_bytes())?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if stored.version != expected_version {
            return Err(conflict(&id, expected_version, stored.version));
        }

        let version = expected_version + 1;
        let mut batch = WriteBatch::default();
        batch.put_cf(
            self.store.cf(CF_QUOTES)?,
            id.as_str(),
            encode(&Versioned::new(quote, version))?,
        );
        self.store.write(batch)?;
        Ok(version)
    }

    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<QuoteRequest>, RepositoryError> {
        let mut quotes = Vec::new();
        for id in self.store.owned_ids(KIND_QUOTE, owner)? {
            if let Some(stored) = self
                .store
                .read::<Versioned<QuoteRequest>>(CF_QUOTES, id.as_bytes())?
            {
                quotes.push(stored.record);
            }
        }
        Ok(quotes)
    }
}
