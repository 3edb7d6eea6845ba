//! # Domain Entities

use chrono::NaiveDate;
use hs_01_identifiers::Identifier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{CargoType, ServiceType, SubjectId, Timestamp};

/// A freight quote request.
///
/// `is_processed` and `quoted_price` change only through the administrative
/// `mark_processed` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub quote_number: Identifier,
    pub owner: SubjectId,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub cargo_type: CargoType,
    pub origin_port: String,
    pub destination_port: String,
    pub cargo_description: String,
    pub weight: Decimal,
    pub dimensions: String,
    pub estimated_value: Option<Decimal>,
    pub preferred_shipping_date: NaiveDate,
    pub special_requirements: String,
    pub is_processed: bool,
    /// Set iff `is_processed`.
    pub quoted_price: Option<Decimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QuoteRequest {
    /// Build an unprocessed request from validated input.
    pub fn submit(
        quote_number: Identifier,
        owner: SubjectId,
        fields: &NewQuoteRequest,
        choices: QuoteChoices,
        now: Timestamp,
    ) -> Self {
        Self {
            quote_number,
            owner,
            company_name: fields.company_name.trim().to_string(),
            contact_name: fields.contact_name.trim().to_string(),
            email: fields.email.trim().to_string(),
            phone: fields.phone.trim().to_string(),
            service_type: choices.service_type,
            cargo_type: choices.cargo_type,
            origin_port: fields.origin_port.trim().to_string(),
            destination_port: fields.destination_port.trim().to_string(),
            cargo_description: fields.cargo_description.trim().to_string(),
            weight: fields.weight,
            dimensions: fields.dimensions.trim().to_string(),
            estimated_value: fields.estimated_value,
            preferred_shipping_date: choices.preferred_shipping_date,
            special_requirements: fields.special_requirements.trim().to_string(),
            is_processed: false,
            quoted_price: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The processed form of this request.
    pub fn processed(&self, price: Decimal, now: Timestamp) -> Self {
        Self {
            is_processed: true,
            quoted_price: Some(price),
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Client-supplied fields of a quote request.
///
/// Identifier, owner, processed flag and price are not part of the input;
/// unknown JSON keys such as `is_processed` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewQuoteRequest {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub service_type: Option<ServiceType>,
    pub cargo_type: Option<CargoType>,
    pub origin_port: String,
    pub destination_port: String,
    pub cargo_description: String,
    pub weight: Decimal,
    pub dimensions: String,
    pub estimated_value: Option<Decimal>,
    pub preferred_shipping_date: Option<NaiveDate>,
    pub special_requirements: String,
}

/// The required selections of a submission, available once it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteChoices {
    pub service_type: ServiceType,
    pub cargo_type: CargoType,
    pub preferred_shipping_date: NaiveDate,
}
