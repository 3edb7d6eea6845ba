//! # Domain Module
//!
//! Identifier value objects, configuration and errors.

pub mod config;
pub mod errors;
pub mod value_objects;

pub use config::*;
pub use errors::*;
pub use value_objects::*;
