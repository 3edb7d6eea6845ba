//! # Input Validation

use super::entities::{NewQuoteRequest, QuoteChoices};
use rust_decimal::Decimal;
use shared_types::validation::{
    limit_text, require_non_negative_decimal, require_positive_decimal, require_text, REQUIRED,
};
use shared_types::FieldError;

pub const MAX_TEXT_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 254;
pub const WEIGHT_DIGITS: u32 = 10;
pub const MONEY_DIGITS: u32 = 12;
pub const DECIMAL_PLACES: u32 = 2;

/// Field errors for a submission; empty when valid.
pub fn validate_new_quote(fields: &NewQuoteRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "company_name", &fields.company_name, MAX_TEXT_LEN);
    require_text(&mut errors, "contact_name", &fields.contact_name, MAX_TEXT_LEN);
    if fields.email.trim().is_empty() {
        errors.push(FieldError::new("email", REQUIRED));
    } else if !is_valid_email(fields.email.trim()) {
        errors.push(FieldError::new("email", "Enter a valid email address."));
    }
    require_text(&mut errors, "phone", &fields.phone, MAX_PHONE_LEN);
    if fields.service_type.is_none() {
        errors.push(FieldError::new("service_type", REQUIRED));
    }
    if fields.cargo_type.is_none() {
        errors.push(FieldError::new("cargo_type", REQUIRED));
    }
    require_text(&mut errors, "origin_port", &fields.origin_port, MAX_TEXT_LEN);
    require_text(&mut errors, "destination_port", &fields.destination_port, MAX_TEXT_LEN);
    require_text(&mut errors, "cargo_description", &fields.cargo_description, usize::MAX);
    require_positive_decimal(&mut errors, "weight", fields.weight, WEIGHT_DIGITS, DECIMAL_PLACES);
    require_text(&mut errors, "dimensions", &fields.dimensions, MAX_TEXT_LEN);
    if let Some(value) = fields.estimated_value {
        require_non_negative_decimal(&mut errors, "estimated_value", value, MONEY_DIGITS, DECIMAL_PLACES);
    }
    if fields.preferred_shipping_date.is_none() {
        errors.push(FieldError::new("preferred_shipping_date", REQUIRED));
    }
    limit_text(&mut errors, "special_requirements", &fields.special_requirements, usize::MAX);

    errors
}

/// Validate a submission and hand back its required selections.
pub fn validate_submission(fields: &NewQuoteRequest) -> Result<QuoteChoices, Vec<FieldError>> {
    let errors = validate_new_quote(fields);
    match (fields.service_type, fields.cargo_type, fields.preferred_shipping_date) {
        (Some(service_type), Some(cargo_type), Some(preferred_shipping_date))
            if errors.is_empty() =>
        {
            Ok(QuoteChoices {
                service_type,
                cargo_type,
                preferred_shipping_date,
            })
        }
        // A missing selection has already been reported as REQUIRED.
        _ => Err(errors),
    }
}

/// Field errors for an operator's price; empty when valid.
pub fn validate_quoted_price(price: Decimal) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require_positive_decimal(&mut errors, "quoted_price", price, MONEY_DIGITS, DECIMAL_PLACES);
    errors
}

/// `local@domain.tld` with no whitespace and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
        && labels.last().is_some_and(|tld| tld.chars().count() >= 2)
}
