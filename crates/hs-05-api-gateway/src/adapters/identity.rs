//! Token table identity provider.

use crate::domain::IdentityConfig;
use crate::ports::IdentityProvider;
use hs_04_access_gate::constant_time_compare;
use shared_types::SubjectId;

/// Resolves tokens from a fixed table loaded at startup.
///
/// Every entry is compared, in constant time, so lookup time does not depend
/// on which token matched.
pub struct StaticTokenIdentityProvider {
    entries: Vec<(String, SubjectId)>,
}

impl StaticTokenIdentityProvider {
    pub fn new<I, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(token, subject)| (token.into(), SubjectId::new(subject)))
                .collect(),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(config.tokens.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IdentityProvider for StaticTokenIdentityProvider {
    fn resolve(&self, token: &str) -> Option<SubjectId> {
        let mut found = None;
        for (candidate, subject) in &self.entries {
            if constant_time_compare(token, candidate) && found.is_none() {
                found = Some(subject.clone());
            }
        }
        found
    }
}
