//! Aggregate document holder
//!
//! Slots are reserved during discovery (first identifier wins) and filled once
//! by the extraction result for that identifier. Nothing is removed or
//! overwritten.

use crate::model::{AggregateDocument, CountryRecords, EntityIdentifier};
use std::collections::HashSet;

/// Single-writer owner of the [`AggregateDocument`]
#[derive(Debug, Default)]
pub struct Aggregator {
    document: AggregateDocument,
    filled: HashSet<EntityIdentifier>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves an empty slot for `identifier`
    ///
    /// Returns false when the identifier was already reserved.
    pub fn reserve(&mut self, identifier: EntityIdentifier) -> bool {
        if self.document.contains_key(&identifier) {
            return false;
        }
        self.document.insert(identifier, CountryRecords::new());
        true
    }

    pub fn is_reserved(&self, identifier: &EntityIdentifier) -> bool {
        self.document.contains_key(identifier)
    }

    /// Fills a reserved slot with one page's records
    ///
    /// Returns false, leaving the document untouched, when the slot was never
    /// reserved or has already been filled.
    pub fn fill(&mut self, identifier: &EntityIdentifier, records: CountryRecords) -> bool {
        let Some(slot) = self.document.get_mut(identifier) else {
            tracing::warn!("Dropping records for unreserved identifier {}", identifier);
            return false;
        };

        if !self.filled.insert(identifier.clone()) {
            tracing::warn!("Dropping duplicate records for {}", identifier);
            return false;
        }

        *slot = records;
        true
    }

    /// Number of reserved identifiers
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Number of country records across every slot
    pub fn country_count(&self) -> usize {
        self.document.values().map(|records| records.len()).sum()
    }

    pub fn document(&self) -> &AggregateDocument {
        &self.document
    }

    pub fn into_document(self) -> AggregateDocument {
        self.document
    }
}
