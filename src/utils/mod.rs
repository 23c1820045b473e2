pub mod config;
pub mod errors;

pub use config::{
    AppConfig, BaiduConfig, BatchConfig, BatchInput, CompletionConfig, LoggingConfig,
    RateLimitConfig, ServerConfig,
};
pub use errors::{CultureBridgeError, Result, TransportError};
