//! JSON rendering for finalized corpora.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::finalize::CorpusRecord;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a finalized corpus to a JSON array.
pub fn to_json(records: &[CorpusRecord], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records),
        JsonFormat::Compact => serde_json::to_string(records),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write a finalized corpus to a UTF-8 JSON file, creating parent
/// directories as needed.
pub fn write_json<P: AsRef<Path>>(
    records: &[CorpusRecord],
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(records, format)?)?;
    Ok(())
}
