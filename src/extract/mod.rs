//! Requirement extraction from nationality pages
//!
//! A page is processed as:
//! - Table classification (which `wikitable`s hold country data)
//! - Row extraction (country, requirement cell, notes cell)
//! - Requirement classification (required / not required / descriptive)
//! - Reference extraction (footnote citations per row)
//!
//! Everything here is synchronous and free of I/O; the crawler hands in the
//! fetched HTML body.

mod refs;
mod requirement;
mod rows;
mod tables;
mod text;

pub use refs::ReferenceExtractor;
pub use requirement::RequirementClassifier;
pub use rows::{extract_row, extract_rows, RawRow};
pub use tables::TableClassifier;
pub use text::{cell_text, is_footnote_marker};

use crate::model::{CountryRecord, CountryRecords};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").unwrap());

/// Result of extracting one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageExtraction {
    /// Records keyed by destination country
    pub records: CountryRecords,

    /// Number of `wikitable`s on the page
    pub tables_total: usize,

    /// Number of tables accepted by the table classifier
    pub tables_matched: usize,
}

/// Runs the extraction pipeline over a page
#[derive(Debug, Clone, Default)]
pub struct PageExtractor {
    tables: TableClassifier,
    requirements: RequirementClassifier,
}

impl PageExtractor {
    pub fn new(tables: TableClassifier, requirements: RequirementClassifier) -> Self {
        Self {
            tables,
            requirements,
        }
    }

    /// Parses `html` and extracts every country record it holds
    ///
    /// A country listed more than once keeps the last row seen.
    pub fn extract_page(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        let references = ReferenceExtractor::new(&document);
        let mut extraction = PageExtraction::default();

        for table in document.select(&TABLE_SELECTOR) {
            extraction.tables_total += 1;

            let Some(rows) = self.tables.data_rows(table) else {
                continue;
            };
            extraction.tables_matched += 1;

            for row in extract_rows(&rows) {
                let record = self.build_record(&row, &references);
                extraction.records.insert(row.country, record);
            }
        }

        extraction
    }

    fn build_record(&self, row: &RawRow<'_>, references: &ReferenceExtractor<'_>) -> CountryRecord {
        let visa_requirement = self.requirements.classify(&cell_text(row.requirement));
        let notes = cell_text(row.notes_source());

        let refs = match row.notes {
            Some(notes_cell) => {
                let mut refs = references.extract(notes_cell);
                refs.extend(references.extract(row.requirement));
                refs
            }
            None => references.extract(row.requirement),
        };

        CountryRecord {
            visa_requirement,
            notes,
            refs,
        }
    }
}
