//! Output handler traits and types
//!
//! This module defines the persistence seam the harvester hands its final
//! document to.

use crate::model::AggregateDocument;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// The harvester calls [`OutputHandler::persist`] exactly once, after every
/// extraction task has finished. Implementations must be thread-safe.
pub trait OutputHandler: Send + Sync {
    /// Human-readable destination, used in log lines
    fn destination(&self) -> String;

    /// Writes the complete document
    ///
    /// # Arguments
    ///
    /// * `document` - The aggregated harvest, read-only
    fn persist(&self, document: &AggregateDocument) -> OutputResult<()>;
}
