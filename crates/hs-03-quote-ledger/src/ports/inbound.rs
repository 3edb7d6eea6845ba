//! # Inbound Ports (Driving Ports)

use crate::domain::{NewQuoteRequest, QuoteError, QuoteRequest};
use async_trait::async_trait;
use hs_04_access_gate::AdminGrant;
use rust_decimal::Decimal;
use shared_types::{Caller, SubjectId};

/// Primary API for the Quote Ledger.
#[async_trait]
pub trait QuoteLedgerApi: Send + Sync {
    /// Record a new, unprocessed request owned by `owner`.
    ///
    /// ## Errors
    ///
    /// - `Validation`: missing or malformed fields
    /// - `GenerationExhausted`: no free quote number within the retry bound
    async fn create(
        &self,
        fields: NewQuoteRequest,
        owner: &SubjectId,
    ) -> Result<QuoteRequest, QuoteError>;

    /// Price a request. Happens at most once per request.
    ///
    /// ## Errors
    ///
    /// - `Validation`: price ≤ 0 or out of range
    /// - `NotFound`: unknown quote number
    /// - `AlreadyProcessed`: the request already has a price
    async fn mark_processed(
        &self,
        grant: &AdminGrant,
        quote_number: &str,
        price: Decimal,
    ) -> Result<QuoteRequest, QuoteError>;

    /// Fetch a request; unknown and foreign requests both yield `NotFound`.
    async fn get(&self, caller: &Caller, quote_number: &str) -> Result<QuoteRequest, QuoteError>;

    /// Requests submitted by `owner`, in creation order.
    async fn list_for_owner(&self, owner: &SubjectId) -> Result<Vec<QuoteRequest>, QuoteError>;
}
