//! In-memory quote repository.

use crate::domain::QuoteRequest;
use crate::ports::QuoteRepository;
use hs_01_identifiers::Identifier;
use parking_lot::RwLock;
use shared_types::{RepositoryError, SubjectId, Versioned};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct State {
    quotes: HashMap<Identifier, Versioned<QuoteRequest>>,
    order: Vec<Identifier>,
}

/// In-memory quote store. Each check-and-write runs under one write lock.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    state: RwLock<State>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn insert(&self, quote: QuoteRequest) -> Result<Versioned<QuoteRequest>, RepositoryError> {
        let mut state = self.state.write();
        let id = quote.quote_number.clone();
        if state.quotes.contains_key(&id) {
            return Err(RepositoryError::Duplicate(id.into_string()));
        }
        let stored = Versioned::initial(quote);
        state.quotes.insert(id.clone(), stored.clone());
        state.order.push(id);
        Ok(stored)
    }

    fn get(
        &self,
        quote_number: &Identifier,
    ) -> Result<Option<Versioned<QuoteRequest>>, RepositoryError> {
        Ok(self.state.read().quotes.get(quote_number).cloned())
    }

    fn commit(&self, quote: QuoteRequest, expected_version: u64) -> Result<u64, RepositoryError> {
        let mut state = self.state.write();
        let id = quote.quote_number.clone();
        let stored = state
            .quotes
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if stored.version != expected_version {
            debug!(
                id = %id,
                expected = expected_version,
                actual = stored.version,
                "[hs-03] Version conflict on commit"
            );
            return Err(RepositoryError::Conflict {
                id: id.into_string(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        let version = expected_version + 1;
        *stored = Versioned::new(quote, version);
        Ok(version)
    }

    fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<QuoteRequest>, RepositoryError> {
        let state = self.state.read();
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.quotes.get(id))
            .filter(|q| &q.record.owner == owner)
            .map(|q| q.record.clone())
            .collect())
    }
}
