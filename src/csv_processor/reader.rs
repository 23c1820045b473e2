use crate::utils::{CultureBridgeError, Result};
use csv::StringRecord;
use std::path::PathBuf;

pub const DIRECT_COLUMN: &str = "direct_utterance";
pub const INDIRECT_COLUMN: &str = "indirect_utterance";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The two translated cells of one input row, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRow {
    pub direct: String,
    pub indirect: String,
}

pub struct CsvStreamReader {
    path: PathBuf,
}

impl CsvStreamReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Err(CultureBridgeError::FileNotFound(
                self.path.display().to_string(),
            ));
        }
        let mut bytes = std::fs::read(&self.path)?;
        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        Ok(bytes)
    }

    /// Reads every row, failing before returning anything when a required
    /// column is absent.
    pub fn read_utterances(&self) -> Result<Vec<UtteranceRow>> {
        let bytes = self.load()?;
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers()?.clone();

        let direct_idx = column_index(&headers, DIRECT_COLUMN)?;
        let indirect_idx = column_index(&headers, INDIRECT_COLUMN)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(UtteranceRow {
                direct: record.get(direct_idx).unwrap_or_default().trim().to_string(),
                indirect: record.get(indirect_idx).unwrap_or_default().trim().to_string(),
            });
        }
        Ok(rows)
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| CultureBridgeError::MissingColumn(column.to_string()))
}
