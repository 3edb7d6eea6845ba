//! # Domain Module
//!
//! Quote requests, their processed lifecycle, validation and errors.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod validation;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use validation::{
    is_valid_email, validate_new_quote, validate_quoted_price, validate_submission,
};
