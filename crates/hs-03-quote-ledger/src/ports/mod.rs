//! # Ports Module

pub mod inbound;
pub mod outbound;

pub use inbound::QuoteLedgerApi;
pub use outbound::QuoteRepository;
