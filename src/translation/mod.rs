pub mod baidu;
pub mod client;
pub mod rate_limit;
pub mod transport;

pub use baidu::BaiduTranslator;
pub use client::CompletionClient;
pub use rate_limit::FixedWindowLimiter;
pub use transport::{ChatRequest, ChatResponse, CompletionTransport, HttpTransport};

use async_trait::async_trait;

/// Single-text translator used by the batch processor.
#[async_trait]
pub trait TextTranslator: Send {
    async fn translate(&mut self, text: &str) -> String;
}
