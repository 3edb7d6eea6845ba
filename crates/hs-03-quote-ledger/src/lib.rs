//! # HS-03 Quote Ledger
//!
//! Freight quote requests submitted by customers and priced by operators.
//!
//! **Component ID:** 03
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Operations
//!
//! | Operation | Caller | Errors |
//! |-----------|--------|--------|
//! | `create` | subject | Validation, GenerationExhausted |
//! | `mark_processed` | admin | Validation, NotFound, AlreadyProcessed, Conflict |
//! | `get` | subject or admin | NotFound |
//! | `list_for_owner` | subject | - |
//!
//! A request is processed at most once: the processed flag and the quoted
//! price are written together and never change afterwards.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryQuoteRepository;
pub use domain::{
    NewQuoteRequest, QuoteChoices, QuoteError, QuoteLedgerConfig, QuoteRequest, QUOTE_NOT_FOUND,
};
pub use ports::{QuoteLedgerApi, QuoteRepository};
pub use service::{QuoteLedger, QuoteLedgerDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
