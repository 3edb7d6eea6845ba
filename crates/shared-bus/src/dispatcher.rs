//! # Notification Dispatcher
//!
//! Background worker that turns bus events into outbound notifications and
//! hands them to a [`NotificationSink`]. Delivery failures stop here.

use crate::events::ShippingEvent;
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Delivery failure reported by a sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Recipient rejected: {0}")]
    Rejected(String),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Outbound delivery port (mail relay, webhook, log).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Sink that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "[notifier] Notification delivered"
        );
        Ok(())
    }
}

/// Notifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Mailbox that receives new quote requests.
    pub quotes_mailbox: String,
    /// Mailbox that receives shipment status changes.
    pub operations_mailbox: String,
    /// Bus capacity per subscriber.
    pub channel_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            quotes_mailbox: "quotes@heritageshipping.com".to_string(),
            operations_mailbox: "operations@heritageshipping.com".to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifierConfigError {
    #[error("Invalid mailbox for {field}: {value}")]
    InvalidMailbox { field: &'static str, value: String },

    #[error("Channel capacity must be greater than zero")]
    ZeroCapacity,
}

impl NotifierConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), NotifierConfigError> {
        for (field, value) in [
            ("quotes_mailbox", &self.quotes_mailbox),
            ("operations_mailbox", &self.operations_mailbox),
        ] {
            let valid = value
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                return Err(NotifierConfigError::InvalidMailbox {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.channel_capacity == 0 {
            return Err(NotifierConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Render an event into a notification, if it warrants one.
#[must_use]
pub fn render_notification(event: &ShippingEvent, config: &NotifierConfig) -> Option<Notification> {
    match event {
        ShippingEvent::QuoteSubmitted {
            quote_number,
            company_name,
            contact_name,
            email,
            service_type,
            origin_port,
            destination_port,
            ..
        } => Some(Notification {
            recipient: config.quotes_mailbox.clone(),
            subject: format!("New Quote Request: {quote_number}"),
            body: format!(
                "New quote request from {company_name}\n\
                 Quote Number: {quote_number}\n\
                 Contact: {contact_name} <{email}>\n\
                 Service: {}\n\
                 Route: {origin_port} -> {destination_port}",
                service_type.label()
            ),
        }),
        ShippingEvent::QuoteProcessed {
            quote_number,
            email,
            quoted_price,
            ..
        } => Some(Notification {
            recipient: email.clone(),
            subject: format!("Your quote {quote_number} is ready"),
            body: format!("Quote Number: {quote_number}\nQuoted Price: {quoted_price}"),
        }),
        ShippingEvent::ShipmentStatusChanged {
            tracking_number,
            to,
            location,
            event_time,
            ..
        } => Some(Notification {
            recipient: config.operations_mailbox.clone(),
            subject: format!("Shipment {tracking_number} updated to {}", to.label()),
            body: format!(
                "Tracking Number: {tracking_number}\nStatus: {}\nLocation: {location}\nAt: {}",
                to.label(),
                event_time.to_rfc3339()
            ),
        }),
        ShippingEvent::ShipmentCreated { .. } => None,
    }
}

/// Dispatcher counters.
#[derive(Debug, Default)]
pub struct DispatchStats {
    delivered: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

impl DispatchStats {
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Events seen, whatever the outcome.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.delivered() + self.failed() + self.skipped()
    }
}

/// Worker delivering bus events to a sink.
pub struct NotificationDispatcher {
    subscription: Subscription,
    sink: Arc<dyn NotificationSink>,
    config: NotifierConfig,
    stats: Arc<DispatchStats>,
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(
        subscription: Subscription,
        sink: Arc<dyn NotificationSink>,
        config: NotifierConfig,
    ) -> Self {
        Self {
            subscription,
            sink,
            config,
            stats: Arc::new(DispatchStats::default()),
        }
    }

    /// Shared handle to the counters, valid after `run` consumes the worker.
    #[must_use]
    pub fn stats(&self) -> Arc<DispatchStats> {
        Arc::clone(&self.stats)
    }

    /// Deliver one event. Never fails.
    pub async fn dispatch(&self, event: &ShippingEvent) {
        let Some(notification) = render_notification(event, &self.config) else {
            self.stats.skipped.fetch_add(1, Ordering::Relaxed);
            debug!(id = event.identifier(), "[notifier] No notification for event");
            return;
        };

        match self.sink.deliver(&notification).await {
            Ok(()) => {
                self.stats.delivered.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    id = event.identifier(),
                    source = event.source_component(),
                    error = %e,
                    "[notifier] Delivery failed, notification discarded"
                );
            }
        }
    }

    /// Run until the bus closes or `shutdown` flips to true.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("[notifier] Dispatcher started");
        loop {
            tokio::select! {
                event = self.subscription.recv() => {
                    match event {
                        Some(event) => self.dispatch(&event).await,
                        None => break,
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!(
            delivered = self.stats.delivered(),
            failed = self.stats.failed(),
            "[notifier] Dispatcher stopped"
        );
    }
}
