//! # HS-05 API Gateway
//!
//! HTTP surface over the Shipment Ledger and the Quote Ledger.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     API GATEWAY (hs-05)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────┐          ┌────────────────────┐      │
//! │  │   Public (8000)    │          │   Admin (8081)     │      │
//! │  │  Bearer → subject  │          │ localhost + APIkey │      │
//! │  └─────────┬──────────┘          └─────────┬──────────┘      │
//! │            │  Tracing → CORS → Timeout → BodyLimit           │
//! │            ▼                               ▼                 │
//! │     Caller::Subject                  Caller::Admin           │
//! └────────────┼───────────────────────────────┼─────────────────┘
//!              ▼                               ▼
//!     hs-02-shipment-ledger           hs-03-quote-ledger
//! ```
//!
//! ## Endpoints
//!
//! | Listener | Route | Operation |
//! |----------|-------|-----------|
//! | public | `POST /quote` | quote `create` |
//! | public | `GET /quote/{qn}` | quote `get` |
//! | public | `GET /track/{tn}` | shipment `get` |
//! | public | `GET /user/shipments` | shipment `list_for_owner` |
//! | public | `GET /user/quotes` | quote `list_for_owner` |
//! | admin | `POST /admin/shipments` | shipment `create` |
//! | admin | `GET /admin/shipments/{tn}` | shipment `get` |
//! | admin | `POST /admin/shipments/{tn}/updates` | shipment `transition` |
//! | admin | `POST /admin/vessels/{vessel}/detach` | shipment `detach_vessel` |
//! | admin | `GET /admin/quotes/{qn}` | quote `get` |
//! | admin | `POST /admin/quotes/{qn}/process` | quote `mark_processed` |
//!
//! Both listeners also serve an unauthenticated `GET /health`.
//!
//! Errors use one body shape, `{kind, message, fields?}`. A record the
//! caller does not own produces exactly the same 404 as a missing one.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod rest;
pub mod router;
pub mod service;

pub use adapters::StaticTokenIdentityProvider;
pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError};
pub use ports::IdentityProvider;
pub use router::{admin_router, public_router, AppState};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
