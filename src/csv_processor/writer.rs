use crate::utils::Result;
use csv::Writer;
use std::fs::{File, OpenOptions};
use std::path::Path;

pub const OUTPUT_HEADERS: [&str; 4] = [
    "direct_utterance",
    "direct_utterance_zh",
    "indirect_utterance",
    "indirect_utterance_zh",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedRow {
    pub direct: String,
    pub direct_zh: String,
    pub indirect: String,
    pub indirect_zh: String,
}

/// Append-only output writer. Every row is flushed as soon as it is written,
/// so the file never holds a partial row from this writer.
pub struct CsvStreamWriter {
    writer: Writer<File>,
    rows_written: usize,
}

impl CsvStreamWriter {
    /// Opens `path` for appending, creating it if needed. The header is
    /// written only when `write_header` is set.
    pub fn open_append(path: impl AsRef<Path>, write_header: bool) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = Writer::from_writer(file);
        if write_header {
            writer.write_record(OUTPUT_HEADERS)?;
            writer.flush()?;
        }
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &TranslatedRow) -> Result<()> {
        self.writer.write_record([
            row.direct.as_str(),
            row.direct_zh.as_str(),
            row.indirect.as_str(),
            row.indirect_zh.as_str(),
        ])?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
