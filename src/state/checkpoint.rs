use crate::utils::Result;
use std::path::Path;

/// Position of a batch job, derived from the output file alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No output file yet.
    NotStarted,
    /// Output exists with fewer data rows than the input.
    InProgress { resume_at: usize, header_present: bool },
    /// Output already holds at least as many data rows as the input.
    Complete { rows: usize },
}

impl BatchState {
    pub fn resume_at(&self) -> Option<usize> {
        match self {
            BatchState::NotStarted => Some(0),
            BatchState::InProgress { resume_at, .. } => Some(*resume_at),
            BatchState::Complete { .. } => None,
        }
    }

    pub fn needs_header(&self) -> bool {
        match self {
            BatchState::NotStarted => true,
            BatchState::InProgress { header_present, .. } => !header_present,
            BatchState::Complete { .. } => false,
        }
    }
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchState::NotStarted => write!(f, "not started"),
            BatchState::InProgress { resume_at, .. } => {
                write!(f, "in progress, resuming at row {}", resume_at + 1)
            }
            BatchState::Complete { rows } => write!(f, "complete ({} rows)", rows),
        }
    }
}

/// Number of CSV records in `output`, header included. `None` when the file
/// does not exist.
pub fn count_output_records(output: &Path) -> Result<Option<usize>> {
    if !output.exists() {
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(output)?;

    let mut count = 0;
    for record in reader.byte_records() {
        record?;
        count += 1;
    }
    Ok(Some(count))
}

/// Derives the job state for an input of `total_rows` rows.
pub fn inspect(output: &Path, total_rows: usize) -> Result<BatchState> {
    let Some(records) = count_output_records(output)? else {
        return Ok(BatchState::NotStarted);
    };
    let processed = records.saturating_sub(1);

    if records > 0 && processed >= total_rows {
        return Ok(BatchState::Complete { rows: processed });
    }

    Ok(BatchState::InProgress {
        resume_at: processed,
        header_present: records > 0,
    })
}
