//! Thread-local RNG generator.

use crate::domain::{Identifier, IdentifierPrefix, NUMBER_SPACE};
use crate::ports::IdentifierGenerator;
use rand::Rng;

/// Production generator: eight uniformly random decimal digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifierGenerator;

impl RandomIdentifierGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierGenerator for RandomIdentifierGenerator {
    fn generate(&self, prefix: &IdentifierPrefix) -> Identifier {
        let number = rand::thread_rng().gen_range(0..NUMBER_SPACE);
        Identifier::compose(prefix, number)
    }
}
