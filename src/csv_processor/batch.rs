//! Resumable batch translation of utterance tables.
//!
//! The output file is the only checkpoint: its data-row count is the number
//! of input rows already translated. Rows are appended in input order and
//! flushed one at a time.

use crate::csv_processor::reader::CsvStreamReader;
use crate::csv_processor::writer::{CsvStreamWriter, TranslatedRow};
use crate::state::{self, BatchState};
use crate::translation::TextTranslator;
use crate::utils::{BatchConfig, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

const PROGRESS_EVERY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    AlreadyComplete { rows: usize },
    Processed { resumed_from: usize, total: usize },
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub completed: Vec<(String, FileOutcome)>,
    pub failed: Vec<(String, String)>,
    pub skipped: Vec<String>,
}

/// Translates the designated columns of `input` into `output`, resuming after
/// whatever rows `output` already holds.
pub async fn process_file<T: TextTranslator>(
    input: &Path,
    output: &Path,
    translator: &mut T,
) -> Result<FileOutcome> {
    info!(input = %input.display(), "Reading input file");
    let rows = CsvStreamReader::new(input).read_utterances()?;
    let total = rows.len();
    info!(total, "Loaded input rows");

    let state = state::inspect(output, total)?;
    let Some(start) = state.resume_at() else {
        info!(output = %output.display(), state = %state, "Output already complete, nothing to do");
        return Ok(FileOutcome::AlreadyComplete { rows: total });
    };

    match state {
        BatchState::InProgress { resume_at, .. } if resume_at > 0 => {
            info!(state = %state, processed = resume_at, "Resuming from existing output");
        }
        _ => info!(output = %output.display(), state = %state, "Starting fresh"),
    }

    let mut writer = CsvStreamWriter::open_append(output, state.needs_header())?;

    for (idx, row) in rows.iter().enumerate().skip(start) {
        let direct_zh = translator.translate(&row.direct).await;
        let indirect_zh = translator.translate(&row.indirect).await;

        writer.write_row(&TranslatedRow {
            direct: row.direct.clone(),
            direct_zh,
            indirect: row.indirect.clone(),
            indirect_zh,
        })?;

        let current = idx + 1;
        if current % PROGRESS_EVERY == 0 || current == total {
            info!(current, total, "Progress");
        }
    }

    info!(output = %output.display(), rows_written = writer.rows_written(), "File complete");
    Ok(FileOutcome::Processed {
        resumed_from: start,
        total,
    })
}

/// Runs every configured input in order. A failing file is logged and the
/// remaining files still run.
pub async fn run_batch<T: TextTranslator>(
    config: &BatchConfig,
    translator: &mut T,
) -> Result<BatchSummary> {
    std::fs::create_dir_all(&config.output_dir)?;
    let started = Instant::now();
    let mut summary = BatchSummary::default();

    for input in &config.inputs {
        if !input.path.exists() {
            warn!(input = %input.path.display(), "Input file does not exist, skipping");
            summary.skipped.push(input.name.clone());
            continue;
        }

        let output = config.output_dir.join(input.output_file_name());
        match process_file(&input.path, &output, translator).await {
            Ok(outcome) => summary.completed.push((input.name.clone(), outcome)),
            Err(e) => {
                error!(input = %input.path.display(), error = %e, "Failed to process file");
                summary.failed.push((input.name.clone(), e.to_string()));
            }
        }
    }

    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        output_dir = %config.output_dir.display(),
        "Batch run finished"
    );
    Ok(summary)
}
