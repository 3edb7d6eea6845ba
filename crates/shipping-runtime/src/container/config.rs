//! # Runtime Configuration
//!
//! Aggregates every component's configuration and loads overrides from
//! `HS_*` environment variables.
//!
//! ## Security Requirements
//!
//! - The admin listener MUST have an API key in production
//!   ([`RuntimeConfig::validate_for_production`]).
//! - Malformed variables are rejected at startup, never silently ignored.

use hs_01_identifiers::{IdentifierConfig, IdentifierConfigError, IdentifierPrefix};
use hs_02_shipment_ledger::ShipmentLedgerConfig;
use hs_03_quote_ledger::QuoteLedgerConfig;
use hs_05_api_gateway::domain::{ConfigError as GatewayConfigError, GatewayConfig, IdentityConfig};
use serde::{Deserialize, Serialize};
use shared_bus::{NotifierConfig, NotifierConfigError};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Shown in place of the value of a secret variable.
const REDACTED: &str = "<redacted>";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Public and admin listeners.
    pub gateway: GatewayConfig,
    /// Tracking/quote number prefixes and attempt bound.
    pub identifiers: IdentifierConfig,
    pub shipments: ShipmentLedgerConfig,
    pub quotes: QuoteLedgerConfig,
    /// Notification mailboxes.
    pub notifier: NotifierConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `HS_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        };

        if let Some((key, value)) = var("HS_HTTP_PORT") {
            config.gateway.http.port = parse(key, &value)?;
        }
        if let Some((key, value)) = var("HS_ADMIN_PORT") {
            config.gateway.admin.port = parse(key, &value)?;
        }
        if let Some((_, value)) = var("HS_ADMIN_API_KEY") {
            config.gateway.admin.api_key = Some(value);
        }
        if let Some((key, value)) = var("HS_SUBJECT_TOKENS") {
            config.gateway.identity = IdentityConfig::parse_table(&value)
                .map_err(|e| ConfigError::invalid(key, REDACTED, e.to_string()))?;
        }
        if let Some((key, value)) = var("HS_TRACKING_PREFIX") {
            config.identifiers.tracking_prefix = prefix(key, &value)?;
        }
        if let Some((key, value)) = var("HS_QUOTE_PREFIX") {
            config.identifiers.quote_prefix = prefix(key, &value)?;
        }
        if let Some((key, value)) = var("HS_ID_MAX_ATTEMPTS") {
            config.identifiers.max_attempts = parse(key, &value)?;
        }
        if let Some((key, value)) = var("HS_CONFLICT_RETRIES") {
            let retries: u32 = parse(key, &value)?;
            config.shipments.max_conflict_retries = retries;
            config.quotes.max_conflict_retries = retries;
        }
        if let Some((_, value)) = var("HS_QUOTES_MAILBOX") {
            config.notifier.quotes_mailbox = value;
        }
        if let Some((key, value)) = var("HS_STORAGE") {
            config.storage.backend = parse(key, &value)?;
        }
        if let Some((_, value)) = var("HS_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(value);
        }
        if let Some((_, value)) = var("HS_LOG_LEVEL") {
            config.logging.level = value;
        }
        if let Some((key, value)) = var("HS_JSON_LOGS") {
            config.logging.json = parse_flag(key, &value)?;
        }

        Ok(config)
    }

    /// Validate every component's configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.identifiers.validate()?;
        self.notifier.validate()?;

        if self.storage.backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::StorageUnavailable);
        }
        Ok(())
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if the ordinary validation fails, or if the admin
    /// listener is enabled without an API key.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.gateway.admin.enabled && self.gateway.admin.api_key.is_none() {
            return Err(ConfigError::MissingAdminApiKey);
        }
        Ok(())
    }
}

/// Where ledger records live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    #[serde(rename = "rocksdb")]
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(format!("expected memory or rocksdb, got {other}")),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// RocksDB directory; unused by the memory backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var} ({value:?}): {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("gateway: {0}")]
    Gateway(#[from] GatewayConfigError),

    #[error("identifiers: {0}")]
    Identifiers(#[from] IdentifierConfigError),

    #[error("notifier: {0}")]
    Notifier(#[from] NotifierConfigError),

    #[error("HS_STORAGE=rocksdb requires building with the `rocksdb` feature")]
    StorageUnavailable,

    #[error(
        "SECURITY VIOLATION: admin listener has no API key. \
         Set HS_ADMIN_API_KEY or disable the admin listener."
    )]
    MissingAdminApiKey,
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidVar {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(var, value, e.to_string()))
}

fn prefix(var: &'static str, value: &str) -> Result<IdentifierPrefix, ConfigError> {
    IdentifierPrefix::new(value).map_err(|e| ConfigError::invalid(var, value, e.to_string()))
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(var, value, "expected true or false")),
    }
}
