//! # Event Publisher
//!
//! The [`Notifier`] port the ledgers call after a commit, and the in-memory
//! bus that implements it.

use crate::events::{EventFilter, ShippingEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Fire-and-forget notification port.
///
/// Implementations must return promptly and must not surface failures; the
/// ledger state is already committed when this is called.
pub trait Notifier: Send + Sync {
    /// Hand an event to the notification pipeline.
    fn notify(&self, event: ShippingEvent);
}

/// In-memory implementation of the notifier bus.
///
/// Uses `tokio::sync::broadcast`, so `notify` is a non-blocking send.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<ShippingEvent>,

    /// Total events published.
    events_published: AtomicU64,

    /// Events dropped because nobody was listening.
    events_dropped: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            events_published: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total events handed to `notify`.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }

    /// Events that found no subscriber.
    #[must_use]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for InMemoryEventBus {
    fn notify(&self, event: ShippingEvent) {
        let topic = event.topic();
        let source = event.source_component();

        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(
                    topic = ?topic,
                    source = source,
                    receivers = receivers,
                    "Event published"
                );
            }
            Err(e) => {
                self.events_dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    topic = ?topic,
                    source = source,
                    error = %e,
                    "Event dropped (no receivers)"
                );
            }
        }
    }
}
