//! Domain types for the API Gateway: configuration and the error body.

pub mod config;
pub mod error;

pub use config::{
    AdminConfig, ConfigError, CorsConfig, GatewayConfig, HttpConfig, IdentityConfig,
    LimitsConfig, TimeoutConfig,
};
pub use error::{status_for, ApiError, GatewayError};
