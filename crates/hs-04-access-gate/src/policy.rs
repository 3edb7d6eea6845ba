//! # Ownership Policy
//!
//! One rule: a subject sees what it owns, the administrator sees everything,
//! and an ownerless record is administrator-only.

use crate::compare::constant_time_compare;
use shared_types::{Caller, SubjectId};
use tracing::debug;

/// May `caller` see a record owned by `owner`?
pub fn authorize(caller: &Caller, owner: Option<&SubjectId>) -> bool {
    match (caller, owner) {
        (Caller::Admin, _) => true,
        (Caller::Subject(subject), Some(owner)) => {
            constant_time_compare(subject.as_str(), owner.as_str())
        }
        (Caller::Subject(_), None) => false,
    }
}

/// Fold a lookup and its authorization into one answer.
///
/// Returns `None` both when the record is missing and when the caller may not
/// see it. Callers turn `None` into their single not-found error, so the two
/// cases produce the same response.
pub fn gate<T, F>(caller: &Caller, found: Option<T>, owner_of: F) -> Option<T>
where
    F: FnOnce(&T) -> Option<&SubjectId>,
{
    let record = found?;
    if authorize(caller, owner_of(&record)) {
        Some(record)
    } else {
        debug!(caller = ?caller, "[hs-04] Record hidden from non-owner");
        None
    }
}
