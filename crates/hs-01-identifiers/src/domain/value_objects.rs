//! # Value Objects
//!
//! Prefixes and the identifiers built from them.

use super::errors::IdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of random decimal digits after the prefix.
pub const DIGIT_COUNT: usize = 8;

/// Prefix length in characters.
pub const PREFIX_LEN: usize = 2;

/// Total identifier length.
pub const IDENTIFIER_LEN: usize = PREFIX_LEN + DIGIT_COUNT;

/// Size of the numeric space behind each prefix (10^8).
pub const NUMBER_SPACE: u32 = 100_000_000;

/// Two uppercase ASCII letters naming an entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentifierPrefix(String);

impl IdentifierPrefix {
    /// Validate and wrap a prefix.
    pub fn new(prefix: &str) -> Result<Self, IdentifierError> {
        if prefix.len() == PREFIX_LEN && prefix.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(prefix.to_string()))
        } else {
            Err(IdentifierError::InvalidPrefix(prefix.to_string()))
        }
    }

    /// Default shipment prefix, `HS`.
    pub fn tracking() -> Self {
        Self("HS".to_string())
    }

    /// Default quote prefix, `HQ`.
    pub fn quote() -> Self {
        Self("HQ".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentifierPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IdentifierPrefix {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<IdentifierPrefix> for String {
    fn from(prefix: IdentifierPrefix) -> Self {
        prefix.0
    }
}

/// A tracking or quote number: prefix followed by eight decimal digits.
///
/// Comparison is exact; `hs12345678` and `HS12345678` are different strings
/// and only the latter is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Build an identifier from a prefix and a number below [`NUMBER_SPACE`].
    ///
    /// Numbers outside the space wrap, so the result is always well formed.
    pub fn compose(prefix: &IdentifierPrefix, number: u32) -> Self {
        Self(format!(
            "{}{:0width$}",
            prefix,
            number % NUMBER_SPACE,
            width = DIGIT_COUNT
        ))
    }

    /// Parse and validate the textual form.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let well_formed = value.len() == IDENTIFIER_LEN
            && value.is_ascii()
            && value[..PREFIX_LEN].bytes().all(|b| b.is_ascii_uppercase())
            && value[PREFIX_LEN..].bytes().all(|b| b.is_ascii_digit());
        if well_formed {
            Ok(Self(value.to_string()))
        } else {
            Err(IdentifierError::Malformed(value.to_string()))
        }
    }

    /// Parse, additionally requiring a specific prefix.
    pub fn parse_with_prefix(
        value: &str,
        prefix: &IdentifierPrefix,
    ) -> Result<Self, IdentifierError> {
        let id = Self::parse(value)?;
        if id.has_prefix(prefix) {
            Ok(id)
        } else {
            Err(IdentifierError::WrongPrefix {
                expected: prefix.to_string(),
                value: value.to_string(),
            })
        }
    }

    pub fn has_prefix(&self, prefix: &IdentifierPrefix) -> bool {
        self.prefix() == prefix.as_str()
    }

    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }

    /// Numeric part.
    pub fn digits(&self) -> &str {
        &self.0[PREFIX_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
