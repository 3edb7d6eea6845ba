//! # Generate-and-Persist Retry Loop
//!
//! Uniqueness lives in the store, so the only safe way to hand out a fresh
//! identifier is to try storing it and regenerate on a duplicate.

use crate::domain::{GenerationExhausted, Identifier, IdentifierPrefix};
use crate::ports::IdentifierGenerator;
use tracing::{debug, warn};

/// Result of one persist attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome<T, E> {
    /// Record stored under the proposed identifier.
    Stored(T),
    /// Identifier already taken. Try another.
    Collision,
    /// Failed for another reason. Stop retrying.
    Rejected(E),
}

/// Propose identifiers and persist until one sticks.
///
/// Calls `persist` at most `max_attempts` times (at least once). Returns the
/// first stored value, the first rejection, or `GenerationExhausted`
/// converted into `E`.
pub fn generate_with_retry<G, T, E, F>(
    generator: &G,
    prefix: &IdentifierPrefix,
    max_attempts: u32,
    mut persist: F,
) -> Result<T, E>
where
    G: IdentifierGenerator + ?Sized,
    E: From<GenerationExhausted>,
    F: FnMut(Identifier) -> PersistOutcome<T, E>,
{
    let attempts = max_attempts.max(1);

    for attempt in 1..=attempts {
        let candidate = generator.generate(prefix);
        match persist(candidate.clone()) {
            PersistOutcome::Stored(value) => {
                if attempt > 1 {
                    debug!(id = %candidate, attempt, "[hs-01] Identifier stored after retry");
                }
                return Ok(value);
            }
            PersistOutcome::Collision => {
                debug!(id = %candidate, attempt, "[hs-01] Identifier collision, regenerating");
            }
            PersistOutcome::Rejected(e) => return Err(e),
        }
    }

    warn!(prefix = %prefix, attempts, "[hs-01] Identifier generation exhausted");
    Err(GenerationExhausted {
        prefix: prefix.to_string(),
        attempts,
    }
    .into())
}
