//! Clock abstraction so ledgers can be tested with fixed time.

use crate::entities::Timestamp;
use chrono::{Duration, Utc};
use parking_lot::RwLock;

/// Time source - outbound port.
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> Timestamp;
}

/// System clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Settable clock for tests.
#[derive(Debug)]
pub struct MockTimeSource {
    now: RwLock<Timestamp>,
}

impl MockTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, at: Timestamp) {
        *self.now.write() = at;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.write() += by;
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }
}
