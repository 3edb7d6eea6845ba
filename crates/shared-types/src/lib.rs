//! # Shared Types Crate
//!
//! Vocabulary shared by the ledgers, the notifier bus and the API gateway.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: status and category enums are defined once
//!   here so events, ledgers and HTTP payloads agree on their wire names.
//! - **Opaque Identity**: a [`SubjectId`] is whatever the identity provider
//!   issued. Nothing in the core inspects its contents.
//! - **Stable Error Kinds**: every user-visible failure maps onto one
//!   [`ErrorKind`], whose string form never changes.

pub mod entities;
pub mod errors;
pub mod time;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use time::{MockTimeSource, SystemTimeSource, TimeSource};
