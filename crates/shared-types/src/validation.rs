//! # Field Validation Helpers
//!
//! Small checks the ledgers compose into per-entity validators. Each helper
//! appends to a `Vec<FieldError>` so a single pass reports every problem.

use crate::entities::FieldError;
use rust_decimal::Decimal;

pub const REQUIRED: &str = "This field is required.";

/// Required text: non-blank and at most `max_chars` characters.
pub fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &str, max_chars: usize) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, REQUIRED));
    } else {
        limit_text(errors, field, value, max_chars);
    }
}

/// Optional text: may be empty, but not longer than `max_chars`.
pub fn limit_text(errors: &mut Vec<FieldError>, field: &str, value: &str, max_chars: usize) {
    if value.chars().count() > max_chars {
        errors.push(FieldError::new(
            field,
            format!("Ensure this field has no more than {max_chars} characters."),
        ));
    }
}

/// Strictly positive decimal with at most `max_digits` digits in total, of
/// which `decimal_places` come after the point.
pub fn require_positive_decimal(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) {
    if value <= Decimal::ZERO {
        errors.push(FieldError::new(field, "Ensure this value is greater than 0."));
    } else {
        check_precision(errors, field, value, max_digits, decimal_places);
    }
}

/// Like [`require_positive_decimal`], but zero is allowed.
pub fn require_non_negative_decimal(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.push(FieldError::new(
            field,
            "Ensure this value is greater than or equal to 0.",
        ));
    } else {
        check_precision(errors, field, value, max_digits, decimal_places);
    }
}

fn check_precision(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) {
    if value.normalize().scale() > decimal_places {
        errors.push(FieldError::new(
            field,
            format!("Ensure that there are no more than {decimal_places} decimal places."),
        ));
        return;
    }

    let whole_digits = max_digits.saturating_sub(decimal_places);
    let limit = Decimal::from(10u64.saturating_pow(whole_digits));
    if value.abs().trunc() >= limit {
        errors.push(FieldError::new(
            field,
            format!("Ensure that there are no more than {whole_digits} digits before the decimal point."),
        ));
    }
}
