//! # Outbound Ports
//!
//! Source of candidate identifiers.

use crate::domain::{Identifier, IdentifierPrefix, NUMBER_SPACE};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

/// Candidate identifier source - outbound port.
///
/// Generators only propose identifiers. Uniqueness is decided by the
/// repository that tries to store them.
pub trait IdentifierGenerator: Send + Sync {
    /// Propose an identifier carrying `prefix`.
    fn generate(&self, prefix: &IdentifierPrefix) -> Identifier;
}

/// Generator that replays a fixed list of numbers, then counts upward.
///
/// Used to force collisions in tests.
#[derive(Debug, Default)]
pub struct ScriptedIdentifierGenerator {
    script: Mutex<VecDeque<u32>>,
    next: AtomicU32,
    calls: AtomicU32,
}

impl ScriptedIdentifierGenerator {
    /// Replay `numbers` in order, then continue from `after_script`.
    pub fn new(numbers: impl IntoIterator<Item = u32>, after_script: u32) -> Self {
        Self {
            script: Mutex::new(numbers.into_iter().collect()),
            next: AtomicU32::new(after_script),
            calls: AtomicU32::new(0),
        }
    }

    /// No script; count upward from `start`.
    pub fn counting(start: u32) -> Self {
        Self::new(Vec::<u32>::new(), start)
    }

    /// Always propose the same number.
    pub fn constant(number: u32) -> ConstantIdentifierGenerator {
        ConstantIdentifierGenerator {
            number,
            calls: AtomicU32::new(0),
        }
    }

    /// Total `generate` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentifierGenerator for ScriptedIdentifierGenerator {
    fn generate(&self, prefix: &IdentifierPrefix) -> Identifier {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let number = match self.script.lock().pop_front() {
            Some(n) => n,
            None => self.next.fetch_add(1, Ordering::SeqCst) % NUMBER_SPACE,
        };
        Identifier::compose(prefix, number)
    }
}

/// Generator stuck on one number.
#[derive(Debug)]
pub struct ConstantIdentifierGenerator {
    number: u32,
    calls: AtomicU32,
}

impl ConstantIdentifierGenerator {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentifierGenerator for ConstantIdentifierGenerator {
    fn generate(&self, prefix: &IdentifierPrefix) -> Identifier {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Identifier::compose(prefix, self.number)
    }
}
