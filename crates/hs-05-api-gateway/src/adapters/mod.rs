//! Adapters for the API Gateway.

pub mod identity;

pub use identity::StaticTokenIdentityProvider;
