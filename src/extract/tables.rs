use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static COUNTRY_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:territor|countr)(?:y|ies)|areas?|europe|africa|america|asia").unwrap()
});

static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static HEADER_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").unwrap());

/// Decides which page tables hold requirement data
///
/// A table qualifies when the text of the first cell of its first row names a
/// country, territory, area or continent. Legend tables, infoboxes and
/// statistics tables fail the test and are skipped whole.
#[derive(Debug, Clone)]
pub struct TableClassifier {
    header_pattern: Regex,
}

impl Default for TableClassifier {
    fn default() -> Self {
        Self {
            header_pattern: COUNTRY_COLUMN_RE.clone(),
        }
    }
}

impl TableClassifier {
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            header_pattern: Regex::new(pattern)?,
        })
    }

    /// Tests a header cell's text against the country vocabulary
    pub fn matches_header(&self, header_text: &str) -> bool {
        self.header_pattern.is_match(header_text)
    }

    /// Returns the data rows (header removed) of a qualifying table
    ///
    /// `None` means the table was rejected. A qualifying table without data
    /// rows yields an empty vector.
    pub fn data_rows<'a>(&self, table: ElementRef<'a>) -> Option<Vec<ElementRef<'a>>> {
        let mut rows = table.select(&ROW_SELECTOR);
        let header = rows.next()?;

        let header_text: String = header
            .select(&HEADER_CELL_SELECTOR)
            .next()
            .map(|cell| cell.text().collect())
            .unwrap_or_default();

        if !self.matches_header(&header_text) {
            return None;
        }

        Some(rows.collect())
    }
}
