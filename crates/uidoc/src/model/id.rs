//! Unique identifiers for document entities.
//!
//! Every component, layer, media query, example, and top-level definition
//! carries an `Id`. Factories are the only production call-sites of
//! [`Id::generate`]; the reducer never invents ids on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique entity identifier (a random v4 UUID under the hood).
///
/// Serialized as a hyphenated lowercase string at the JSON boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an id from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Builds an id from a raw value. Intended for tests and fixtures.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
