pub mod adaptation;
pub mod csv_processor;
pub mod server;
pub mod state;
pub mod translation;
pub mod utils;

pub use adaptation::{Adaptation, ContextType, CultureAdapter, SemanticType};
pub use csv_processor::{process_file, run_batch, BatchSummary, FileOutcome};
pub use state::BatchState;
pub use translation::{BaiduTranslator, CompletionClient, FixedWindowLimiter, TextTranslator};
pub use utils::{AppConfig, CultureBridgeError, Result};
