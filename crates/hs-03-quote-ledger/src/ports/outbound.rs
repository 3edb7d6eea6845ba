//! # Outbound Ports (Driven Ports)

use crate::domain::QuoteRequest;
use hs_01_identifiers::Identifier;
use shared_types::{RepositoryError, SubjectId, Versioned};

/// Quote store - outbound port.
///
/// `insert` refuses an existing quote number (`Duplicate`); `commit` writes
/// only if the stored version equals `expected_version` (`Conflict`).
pub trait QuoteRepository: Send + Sync {
    fn insert(&self, quote: QuoteRequest) -> Result<Versioned<QuoteRequest>, RepositoryError>;

    fn get(&self, quote_number: &Identifier)
        -> Result<Option<Versioned<QuoteRequest>>, RepositoryError>;

    /// Replace a stored request, guarded by version. Returns the new version.
    fn commit(&self, quote: QuoteRequest, expected_version: u64) -> Result<u64, RepositoryError>;

    /// Requests submitted by `owner`, in creation order.
    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<QuoteRequest>, RepositoryError>;
}
