//! # Shared Bus - Notifier for Ledger Events
//!
//! Ledgers announce committed state changes here. Delivery happens later, on
//! a background worker, so nothing a notification sink does can reach back
//! into a ledger transaction.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  notify()   ┌──────────────┐  recv()   ┌────────────────────────┐
//! │ Quote Ledger │ ──────────→ │  Event Bus   │ ────────→ │ NotificationDispatcher │
//! │ Ship. Ledger │  (no wait)  │ (broadcast)  │           │   render → sink        │
//! └──────────────┘             └──────────────┘           └───────────┬────────────┘
//!                                                                     │ failure
//!                                                                     ↓
//!                                                               warn! + discard
//! ```
//!
//! ## Guarantees
//!
//! - `notify` never blocks and never returns an error.
//! - Events published with no live subscriber are dropped and counted.
//! - A failing sink is logged; the ledger never learns about it.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod dispatcher;
pub mod events;
pub mod publisher;
pub mod subscriber;

pub use dispatcher::{
    render_notification, DeliveryError, DispatchStats, LogSink, Notification,
    NotificationDispatcher, NotificationSink, NotifierConfig, NotifierConfigError,
};
pub use events::{EventFilter, EventTopic, ShippingEvent};
pub use publisher::{InMemoryEventBus, Notifier};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events buffered per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
