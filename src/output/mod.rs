//! Output module for the harvested document
//!
//! This module handles:
//! - Holding the aggregate document while pages are extracted
//! - Persisting it through an [`OutputHandler`] (JSON file by default)
//! - Reporting harvest statistics

mod aggregate;
mod json;
pub mod stats;
mod traits;

pub use aggregate::Aggregator;
pub use json::{format_document, JsonFileOutput};
pub use stats::{format_statistics, print_statistics, HarvestReport};
pub use traits::{OutputError, OutputHandler, OutputResult};
