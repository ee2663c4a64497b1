//! Letter collections and their configuration.

mod profile;

pub use profile::{
    BoundaryRule, CollectionProfile, ContentRule, FieldJoin, FieldTarget, SeparatorRule,
    TextContribution, JEAKE, MARESCOE_DAVID,
};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The supported letter collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// The Jeake family correspondence
    Jeake,
    /// The Marescoe-David merchant correspondence
    MarescoeDavid,
}

impl Collection {
    /// The collection's configuration tables.
    pub fn profile(&self) -> &'static CollectionProfile {
        match self {
            Collection::Jeake => &JEAKE,
            Collection::MarescoeDavid => &MARESCOE_DAVID,
        }
    }

    /// All supported collections.
    pub fn all() -> &'static [Collection] {
        &[Collection::Jeake, Collection::MarescoeDavid]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jeake" => Ok(Collection::Jeake),
            "marescoe-david" => Ok(Collection::MarescoeDavid),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_round_trip() {
        for collection in Collection::all() {
            let name = collection.to_string();
            let parsed: Collection = name.parse().unwrap();
            assert_eq!(parsed, *collection);
        }
    }

    #[test]
    fn test_unknown_collection() {
        let result: std::result::Result<Collection, _> = "pepys".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_profiles_share_stamped_fields() {
        for collection in Collection::all() {
            let schema = collection.profile().schema;
            for field in ["SERIAL_NR", "PAGE", "TEXT", "CHAPTER", "LANGUAGE"] {
                assert!(schema.contains(&field), "{} missing {}", collection, field);
            }
        }
    }
}
