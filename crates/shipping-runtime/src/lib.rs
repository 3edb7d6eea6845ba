//! # Shipping Runtime Library
//!
//! Wiring for the Heritage Shipping core. The `shipping-runtime` binary
//! loads [`RuntimeConfig`] from the environment and hands it to
//! [`ShippingRuntime`]; tests build the same pieces directly.
//!
//! ## Modules
//!
//! - `container/` - Configuration and the wired ledgers
//! - `adapters/` - Storage backends (in-memory, RocksDB behind `rocksdb`)
//! - `logging` - tracing subscriber setup
//! - `runtime` - Notifier worker and gateway under one shutdown signal
//!
//! ## Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HS_HTTP_PORT` | 8000 |
//! | `HS_ADMIN_PORT` | 8081 |
//! | `HS_ADMIN_API_KEY` | (unset) |
//! | `HS_SUBJECT_TOKENS` | (empty) |
//! | `HS_TRACKING_PREFIX` / `HS_QUOTE_PREFIX` | `HS` / `HQ` |
//! | `HS_ID_MAX_ATTEMPTS` | 5 |
//! | `HS_CONFLICT_RETRIES` | 3 |
//! | `HS_QUOTES_MAILBOX` | `quotes@heritageshipping.com` |
//! | `HS_STORAGE` | `memory` |
//! | `HS_DATA_DIR` | `./data` |
//! | `HS_LOG_LEVEL` / `HS_JSON_LOGS` | `info` / false |

#![warn(clippy::all)]
#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod logging;
pub mod runtime;

pub use container::{ConfigError, RuntimeConfig, ShippingContainer, StorageBackend};
pub use runtime::ShippingRuntime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
