//! # Algorithms

pub mod retry;

pub use retry::{generate_with_retry, PersistOutcome};
