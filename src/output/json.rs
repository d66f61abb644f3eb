//! JSON document output
//!
//! Writes the aggregate as pretty-printed UTF-8 JSON (2-space indentation).

use crate::model::AggregateDocument;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output handler writing the document to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileOutput {
    path: PathBuf,
}

impl JsonFileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonFileOutput {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn persist(&self, document: &AggregateDocument) -> OutputResult<()> {
        let json = format_document(document)?;

        let mut file = BufWriter::new(File::create(&self.path)?);
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;

        Ok(())
    }
}

/// Formats the document as pretty-printed JSON
pub fn format_document(document: &AggregateDocument) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
