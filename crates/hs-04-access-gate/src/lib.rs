//! # HS-04 Access Gate
//!
//! Owner-only visibility for ledger reads, and the capability token that
//! guards administrative writes.
//!
//! **Component ID:** 04
//!
//! ## Rules
//!
//! | Caller | Owned by caller | Owned by someone else | No owner |
//! |--------|-----------------|-----------------------|----------|
//! | Subject | visible | hidden | hidden |
//! | Admin | visible | visible | visible |
//!
//! Hidden records are reported exactly like missing ones. Ledgers apply
//! [`gate`] to the result of their lookup, inside the same operation, so a
//! caller cannot tell "not yours" from "does not exist".
//!
//! ## Administrative Writes
//!
//! `create`, `transition`, `detach_vessel` and `mark_processed` take an
//! [`AdminGrant`]. Only [`admin_grant`] mints one, and only for
//! [`Caller::Admin`](shared_types::Caller::Admin).

#![warn(clippy::all)]

pub mod compare;
pub mod grant;
pub mod policy;

pub use compare::constant_time_compare;
pub use grant::{admin_grant, AdminGrant};
pub use policy::{authorize, gate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
