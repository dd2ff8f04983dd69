//! Free-text address cleanup.
//!
//! Users often type the street type ("Via", "Corso", ...) in front of the
//! street name, but the toponomastic lookups expect the bare name. The first
//! token is dropped when it is in the prefix vocabulary.

use copertura_core::PrefixVocabulary;

/// An address with its street-type prefix split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    /// The stripped prefix as typed, if one was found.
    pub street_type: Option<String>,
    /// Remaining tokens joined by single spaces. May be empty.
    pub address: String,
}

impl NormalizedAddress {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }
}

/// Splits `raw` on whitespace, drops a leading street-type token, and
/// rejoins the rest with single spaces.
#[must_use]
pub fn normalize_address(raw: &str, vocabulary: &PrefixVocabulary) -> NormalizedAddress {
    let mut tokens = raw.split_whitespace().peekable();

    let street_type = tokens
        .next_if(|first| vocabulary.contains(first))
        .map(str::to_string);

    NormalizedAddress {
        street_type,
        address: tokens.collect::<Vec<_>>().join(" "),
    }
}
