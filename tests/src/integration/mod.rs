//! # Integration Tests

pub mod concurrency;
pub mod gateway_flows;
pub mod notifications;
pub mod runtime_config;
pub mod shipment_flows;
