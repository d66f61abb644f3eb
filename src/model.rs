//! Harvest data model
//!
//! The aggregate document maps each nationality identifier to the records
//! extracted from that nationality's page, keyed by destination country.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized key for a nationality, optionally qualified by a sub-region
/// (`nationality` or `nationality_subregion`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityIdentifier(String);

impl EntityIdentifier {
    /// Composes an identifier from a nationality and an optional sub-region
    pub fn new(nationality: &str, subregion: Option<&str>) -> Self {
        match subregion {
            Some(region) => Self(format!("{}_{}", nationality, region)),
            None => Self(nationality.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classified content of a requirement cell
///
/// Serializes as `true` / `false` / the descriptive text; `Unknown` is left
/// out of the owning record entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementOutcome {
    Required,
    NotRequired,
    Descriptive(String),
    Unknown,
}

impl RequirementOutcome {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl Serialize for RequirementOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Required => serializer.serialize_bool(true),
            Self::NotRequired => serializer.serialize_bool(false),
            Self::Descriptive(text) => serializer.serialize_str(text),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

/// Requirement record for one destination country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    #[serde(skip_serializing_if = "RequirementOutcome::is_unknown")]
    pub visa_requirement: RequirementOutcome,
    pub notes: String,
    pub refs: Vec<String>,
}

/// Records of one nationality page, keyed by destination country name
pub type CountryRecords = BTreeMap<String, CountryRecord>;

/// Cumulative harvest result, keyed by nationality identifier
pub type AggregateDocument = BTreeMap<EntityIdentifier, CountryRecords>;
