//! # HS-01 Identifier Generator
//!
//! Human-readable, collision-checked identifiers for shipments and quotes.
//!
//! **Component ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Format
//!
//! | Entity | Prefix | Example |
//! |--------|--------|---------|
//! | Shipment tracking number | `HS` | `HS04718263` |
//! | Quote number | `HQ` | `HQ12345678` |
//!
//! Two uppercase ASCII letters followed by eight decimal digits, fixed length,
//! compared exactly.
//!
//! ## Collision Handling
//!
//! ```text
//! generate(prefix) ──→ persist(candidate) ──┬─ Stored    → Ok
//!        ↑                                  ├─ Rejected  → Err
//!        └──────────── Collision ───────────┘ (≤ max_attempts, then
//!                                               GenerationExhausted)
//! ```
//!
//! The generator holds no registry of issued numbers. Concurrent creators
//! are safe because the repository's uniqueness check decides.

#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;

pub use adapters::RandomIdentifierGenerator;
pub use algorithms::{generate_with_retry, PersistOutcome};
pub use domain::{
    GenerationExhausted, Identifier, IdentifierConfig, IdentifierConfigError, IdentifierError,
    IdentifierPrefix, DEFAULT_MAX_ATTEMPTS, DIGIT_COUNT, IDENTIFIER_LEN, NUMBER_SPACE,
};
pub use ports::{ConstantIdentifierGenerator, IdentifierGenerator, ScriptedIdentifierGenerator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
