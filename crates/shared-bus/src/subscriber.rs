//! # Event Subscriber
//!
//! The receiving side of the bus.

use crate::events::{EventFilter, ShippingEvent};
use thiserror::Error;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Event bus closed")]
    Closed,
}

/// Filtered view of the bus. Dropping it unsubscribes.
pub struct Subscription {
    receiver: Receiver<ShippingEvent>,
    filter: EventFilter,
    skipped: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: Receiver<ShippingEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            skipped: 0,
        }
    }

    /// Next matching event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<ShippingEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => self.lagged(missed),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv); `Ok(None)` when nothing is queued.
    pub fn try_recv(&mut self) -> Result<Option<ShippingEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => self.lagged(missed),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Events overwritten before this subscriber read them.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    fn lagged(&mut self, missed: u64) {
        self.skipped += missed;
        warn!(missed, total = self.skipped, "[notifier] Subscriber lagged, events skipped");
    }
}
