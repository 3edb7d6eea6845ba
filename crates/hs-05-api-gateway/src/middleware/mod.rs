//! Middleware stack for the API Gateway.
//!
//! Layer order (outermost first):
//! Request → Tracing → CORS → Timeout → BodyLimit → Auth → Handler

pub mod auth;
pub mod cors;
pub mod tracing;

pub use auth::{AdminAuthConfig, AdminAuthLayer, SubjectAuthLayer};
pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
