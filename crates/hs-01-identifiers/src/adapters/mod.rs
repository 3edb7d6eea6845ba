//! # Adapters

pub mod random;

pub use random::RandomIdentifierGenerator;
