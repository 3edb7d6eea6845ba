//! # Runtime Adapters
//!
//! Port implementations the ledgers do not ship themselves.

pub mod storage;

pub use storage::Repositories;
