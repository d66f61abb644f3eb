use crate::extract::text::cell_text;
use scraper::ElementRef;

/// A table row reduced to its positional cells
#[derive(Debug, Clone)]
pub struct RawRow<'a> {
    /// Destination country name, footnote markers stripped
    pub country: String,

    /// First cell after the country cell
    pub requirement: ElementRef<'a>,

    /// Second cell after the country cell, if the row has one
    pub notes: Option<ElementRef<'a>>,
}

impl<'a> RawRow<'a> {
    /// The cell notes are read from: the notes cell, else the requirement cell
    pub fn notes_source(&self) -> ElementRef<'a> {
        self.notes.unwrap_or(self.requirement)
    }
}

/// Reduces one data row to a [`RawRow`]
///
/// Returns `None` for rows without `td` cells (header and spacer rows) and
/// for rows holding a country name but no requirement cell.
pub fn extract_row<'a>(row: ElementRef<'a>) -> Option<RawRow<'a>> {
    let cells: Vec<ElementRef<'a>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .collect();

    if !cells.iter().any(|cell| cell.value().name() == "td") {
        return None;
    }

    let mut cells = cells.into_iter();

    let country = cell_text(cells.next()?);
    let requirement = cells.next()?;
    let notes = cells.next();

    Some(RawRow {
        country,
        requirement,
        notes,
    })
}

/// Reduces every data row of a classified table, skipping unusable rows
pub fn extract_rows<'a>(rows: &[ElementRef<'a>]) -> Vec<RawRow<'a>> {
    rows.iter()
        .filter_map(|row| {
            let extracted = extract_row(*row);
            if extracted.is_none() {
                tracing::trace!("Skipping row without usable cells");
            }
            extracted
        })
        .collect()
}
