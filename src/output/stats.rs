//! Harvest statistics
//!
//! Counters collected while a harvest runs, and their console rendering.

use std::time::Duration;

/// Outcome counters of one harvest run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestReport {
    /// Links on the category page that resolved to an identifier
    pub links_matched: usize,

    /// Distinct identifiers (extraction tasks) discovered
    pub identifiers_discovered: usize,

    /// Pages fetched and extracted successfully
    pub pages_extracted: usize,

    /// Pages whose fetch failed; their slots stay empty
    pub pages_failed: usize,

    /// `wikitable`s seen across all extracted pages
    pub tables_total: usize,

    /// Tables accepted by the table classifier
    pub tables_matched: usize,

    /// Country records in the final document
    pub countries_recorded: usize,

    /// Whether the document reached the output handler without error
    pub persisted: bool,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl HarvestReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of discovered pages that were extracted
    pub fn success_rate(&self) -> f64 {
        if self.identifiers_discovered == 0 {
            return 0.0;
        }
        (self.pages_extracted as f64 / self.identifiers_discovered as f64) * 100.0
    }
}

/// Formats the report for console output
pub fn format_statistics(report: &HarvestReport) -> String {
    let mut out = String::new();

    out.push_str("=== Visa-Harvest Statistics ===\n\n");
    out.push_str(&format!("Links matched:          {}\n", report.links_matched));
    out.push_str(&format!(
        "Identifiers discovered: {}\n",
        report.identifiers_discovered
    ));
    out.push_str(&format!(
        "Pages extracted:        {} ({:.2}%)\n",
        report.pages_extracted,
        report.success_rate()
    ));
    out.push_str(&format!("Pages failed:           {}\n", report.pages_failed));
    out.push_str(&format!(
        "Tables used:            {} of {}\n",
        report.tables_matched, report.tables_total
    ));
    out.push_str(&format!(
        "Countries recorded:     {}\n",
        report.countries_recorded
    ));
    out.push_str(&format!(
        "Document written:       {}\n",
        if report.persisted { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "Elapsed:                {:.2}s\n",
        report.elapsed.as_secs_f64()
    ));

    out
}

/// Prints the report to stdout
pub fn print_statistics(report: &HarvestReport) {
    print!("{}", format_statistics(report));
}
