pub mod batch;
pub mod reader;
pub mod writer;

pub use batch::{process_file, run_batch, BatchSummary, FileOutcome};
pub use reader::{CsvStreamReader, UtteranceRow, DIRECT_COLUMN, INDIRECT_COLUMN};
pub use writer::{CsvStreamWriter, TranslatedRow, OUTPUT_HEADERS};
