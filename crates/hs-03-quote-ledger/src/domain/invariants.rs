//! # Domain Invariants

use super::entities::QuoteRequest;
use rust_decimal::Decimal;

/// `quoted_price` is present iff the request is processed, and positive.
pub fn invariant_price_iff_processed(quote: &QuoteRequest) -> bool {
    match quote.quoted_price {
        Some(price) => quote.is_processed && price > Decimal::ZERO,
        None => !quote.is_processed,
    }
}

pub fn invariant_positive_weight(quote: &QuoteRequest) -> bool {
    quote.weight > Decimal::ZERO
}

pub fn check_quote(quote: &QuoteRequest) -> bool {
    invariant_price_iff_processed(quote) && invariant_positive_weight(quote)
}
