//! # Quote Ledger Service
//!
//! Application service implementing [`QuoteLedgerApi`].

use crate::domain::{
    check_quote, validate_quoted_price, validate_submission, NewQuoteRequest, QuoteError,
    QuoteLedgerConfig, QuoteRequest,
};
use crate::ports::{QuoteLedgerApi, QuoteRepository};
use async_trait::async_trait;
use hs_01_identifiers::{
    generate_with_retry, Identifier, IdentifierConfig, IdentifierGenerator, PersistOutcome,
};
use hs_04_access_gate::{gate, AdminGrant};
use rust_decimal::Decimal;
use shared_bus::{Notifier, ShippingEvent};
use shared_types::{Caller, RepositoryError, SubjectId, TimeSource};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Dependencies for [`QuoteLedger`].
pub struct QuoteLedgerDependencies {
    pub repository: Arc<dyn QuoteRepository>,
    pub generator: Arc<dyn IdentifierGenerator>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn TimeSource>,
}

/// The Quote Ledger.
pub struct QuoteLedger {
    repository: Arc<dyn QuoteRepository>,
    generator: Arc<dyn IdentifierGenerator>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn TimeSource>,
    identifiers: IdentifierConfig,
    config: QuoteLedgerConfig,
}

impl QuoteLedger {
    pub fn new(
        deps: QuoteLedgerDependencies,
        identifiers: IdentifierConfig,
        config: QuoteLedgerConfig,
    ) -> Self {
        Self {
            repository: deps.repository,
            generator: deps.generator,
            notifier: deps.notifier,
            clock: deps.clock,
            identifiers,
            config,
        }
    }

    fn parse_quote_number(&self, value: &str) -> Option<Identifier> {
        Identifier::parse_with_prefix(value, &self.identifiers.quote_prefix).ok()
    }

    fn storage_failure(err: RepositoryError) -> QuoteError {
        let err = QuoteError::from(err);
        if let QuoteError::Storage(detail) = &err {
            error!(error = %detail, "[hs-03] Quote storage failure");
        }
        err
    }

    fn persist_new(&self, candidate: QuoteRequest) -> PersistOutcome<QuoteRequest, QuoteError> {
        match self.repository.insert(candidate) {
            Ok(stored) => PersistOutcome::Stored(stored.record),
            Err(RepositoryError::Duplicate(_)) => PersistOutcome::Collision,
            Err(e) => PersistOutcome::Rejected(Self::storage_failure(e)),
        }
    }
}

#[async_trait]
impl QuoteLedgerApi for QuoteLedger {
    async fn create(
        &self,
        fields: NewQuoteRequest,
        owner: &SubjectId,
    ) -> Result<QuoteRequest, QuoteError> {
        let choices = validate_submission(&fields).map_err(QuoteError::Validation)?;

        let now = self.clock.now();
        let quote = generate_with_retry(
            self.generator.as_ref(),
            &self.identifiers.quote_prefix,
            self.identifiers.max_attempts,
            |quote_number| {
                self.persist_new(QuoteRequest::submit(
                    quote_number,
                    owner.clone(),
                    &fields,
                    choices,
                    now,
                ))
            },
        )?;

        info!(
            quote_number = %quote.quote_number,
            owner = %quote.owner,
            service = %quote.service_type,
            "[hs-03] Quote request submitted"
        );

        self.notifier.notify(ShippingEvent::QuoteSubmitted {
            quote_number: quote.quote_number.to_string(),
            owner: quote.owner.clone(),
            company_name: quote.company_name.clone(),
            contact_name: quote.contact_name.clone(),
            email: quote.email.clone(),
            service_type: quote.service_type,
            origin_port: quote.origin_port.clone(),
            destination_port: quote.destination_port.clone(),
            submitted_at: quote.created_at,
        });

        Ok(quote)
    }

    async fn mark_processed(
        &self,
        _grant: &AdminGrant,
        quote_number: &str,
        price: Decimal,
    ) -> Result<QuoteRequest, QuoteError> {
        let errors = validate_quoted_price(price);
        if !errors.is_empty() {
            return Err(QuoteError::Validation(errors));
        }
        let id = self
            .parse_quote_number(quote_number)
            .ok_or(QuoteError::NotFound)?;

        for attempt in 0..=self.config.max_conflict_retries {
            let stored = self
                .repository
                .get(&id)
                .map_err(Self::storage_failure)?
                .ok_or(QuoteError::NotFound)?;
            if stored.record.is_processed {
                return Err(QuoteError::AlreadyProcessed(id.into_string()));
            }

            let now = self.clock.now();
            let next = stored.record.processed(price, now);
            debug_assert!(check_quote(&next));

            match self.repository.commit(next.clone(), stored.version) {
                Ok(version) => {
                    info!(
                        quote_number = %id,
                        quoted_price = %price,
                        version,
                        "[hs-03] Quote request processed"
                    );
                    self.notifier.notify(ShippingEvent::QuoteProcessed {
                        quote_number: id.to_string(),
                        owner: next.owner.clone(),
                        email: next.email.clone(),
                        quoted_price: price,
                        processed_at: now,
                    });
                    return Ok(next);
                }
                Err(RepositoryError::Conflict { .. }) => {
                    debug!(quote_number = %id, attempt, "[hs-03] Lost version race, re-reading");
                }
                Err(e) => return Err(Self::storage_failure(e)),
            }
        }

        warn!(
            quote_number = %id,
            retries = self.config.max_conflict_retries,
            "[hs-03] Processing abandoned after repeated conflicts"
        );
        Err(QuoteError::Conflict(id.into_string()))
    }

    async fn get(&self, caller: &Caller, quote_number: &str) -> Result<QuoteRequest, QuoteError> {
        let found = match self.parse_quote_number(quote_number) {
            Some(id) => self.repository.get(&id).map_err(Self::storage_failure)?,
            None => None,
        };

        gate(caller, found, |q| Some(&q.record.owner))
            .map(|q| q.record)
            .ok_or(QuoteError::NotFound)
    }

    async fn list_for_owner(&self, owner: &SubjectId) -> Result<Vec<QuoteRequest>, QuoteError> {
        self.repository
            .list_by_owner(owner)
            .map_err(Self::storage_failure)
    }
}
