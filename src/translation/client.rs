use crate::translation::rate_limit::FixedWindowLimiter;
use crate::translation::transport::{ChatRequest, CompletionTransport, HttpTransport};
use crate::translation::TextTranslator;
use crate::utils::{AppConfig, CompletionConfig, Result, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Instruction sent ahead of every text.
const PROMPT_PREAMBLE: &str = "请将以下英文文本准确翻译成中文，保持原意和语气不变，不要添加额外内容：\n";

/// Labels some models put in front of the translation.
const LABEL_PREFIXES: &[&str] = &["翻译：", "翻译:"];

/// Wait before the next attempt, or `None` when the failure is not retried.
/// `attempt` is 1-based.
pub fn backoff_for(error: &TransportError, attempt: usize) -> Option<Duration> {
    let attempt = attempt as u64;
    match error {
        TransportError::Timeout | TransportError::Connect(_) => {
            Some(Duration::from_secs(2 * attempt))
        }
        TransportError::Status { status: 429, .. } => Some(Duration::from_secs(30 * attempt)),
        TransportError::Status { .. } => None,
        TransportError::Other(_) => Some(Duration::from_secs(2)),
    }
}

pub fn build_prompt(text: &str) -> String {
    format!("{}{}", PROMPT_PREAMBLE, text)
}

pub fn strip_label(content: &str) -> String {
    let trimmed = content.trim();
    LABEL_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Rate-limited, retrying completion client. Never fails: when the vendor
/// cannot produce a translation the input text is returned.
pub struct CompletionClient<T = HttpTransport> {
    transport: T,
    limiter: FixedWindowLimiter,
    config: CompletionConfig,
}

impl CompletionClient<HttpTransport> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.completion)?;
        Ok(Self::new(
            transport,
            FixedWindowLimiter::from_config(&config.rate_limit),
            config.completion.clone(),
        ))
    }
}

impl<T: CompletionTransport> CompletionClient<T> {
    pub fn new(transport: T, limiter: FixedWindowLimiter, config: CompletionConfig) -> Self {
        Self {
            transport,
            limiter,
            config,
        }
    }

    pub async fn translate_with_retries(&mut self, text: &str, max_retries: usize) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        self.limiter.acquire().await;

        let request = ChatRequest::single_turn(
            &self.config.model,
            build_prompt(text),
            self.config.temperature,
            self.config.max_tokens,
        );

        for attempt in 1..=max_retries {
            let error = match self.transport.complete(&request).await {
                Ok(response) => {
                    return match response.first_content() {
                        Some(content) => strip_label(content),
                        None => text.to_string(),
                    };
                }
                Err(e) => e,
            };

            let preview: String = text.chars().take(30).collect();
            let Some(wait) = backoff_for(&error, attempt) else {
                warn!(error = %error, text = %preview, "Non-retryable failure, keeping original text");
                return text.to_string();
            };
            if attempt == max_retries {
                warn!(error = %error, attempts = attempt, text = %preview, "Retries exhausted, keeping original text");
                return text.to_string();
            }

            debug!(error = %error, attempt, wait_secs = wait.as_secs(), "Completion failed, backing off");
            tokio::time::sleep(wait).await;
        }

        text.to_string()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: CompletionTransport> TextTranslator for CompletionClient<T> {
    async fn translate(&mut self, text: &str) -> String {
        let max_retries = self.config.max_retries;
        self.translate_with_retries(text, max_retries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::transport::{ChatResponse, Choice, ResponseMessage};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    type Outcome = std::result::Result<ChatResponse, TransportError>;

    /// Replays scripted outcomes; once exhausted it repeats the last one.
    struct ScriptedTransport {
        outcomes: Mutex<VecDeque<Outcome>>,
        last: Outcome,
        calls: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<Outcome>) -> Self {
            let last = outcomes.last().cloned().unwrap();
            Self {
                outcomes: Mutex::new(outcomes.into()),
                last,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn always(outcome: Outcome) -> Self {
            Self::new(vec![outcome])
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionTransport for ScriptedTransport {
        async fn complete(&self, request: &ChatRequest) -> Outcome {
            self.calls.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.last.clone())
        }
    }

    fn reply(content: &str) -> Outcome {
        Ok(ChatResponse {
            choices: vec![Choice {
                message: Some(ResponseMessage {
                    content: Some(content.to_string()),
                }),
            }],
        })
    }

    fn client(transport: ScriptedTransport) -> CompletionClient<ScriptedTransport> {
        CompletionClient::new(
            transport,
            FixedWindowLimiter::new(100, Duration::from_secs(60)),
            CompletionConfig::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn returns_cleaned_translation() {
        let mut client = client(ScriptedTransport::always(reply("  翻译： 我明天会迟到。 ")));
        let result = client.translate("I will be late tomorrow.").await;
        assert_eq!(result, "我明天会迟到。");

        let calls = client.transport().calls.lock().unwrap();
        let request = &calls[0];
        assert_eq!(request.model, "qwen2.5-7b-instruct");
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(
            request.messages[0].content[0].text,
            "请将以下英文文本准确翻译成中文，保持原意和语气不变，不要添加额外内容：\nI will be late tomorrow."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_skips_the_network() {
        let mut client = client(ScriptedTransport::always(reply("unused")));
        assert_eq!(client.translate("   ").await, "");
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timeouts_back_off_linearly_then_return_original() {
        let mut client = client(ScriptedTransport::always(Err(TransportError::Timeout)));
        let start = Instant::now();

        let result = client.translate_with_retries("hello", 3).await;

        assert_eq!(result, "hello");
        assert_eq!(client.transport().call_count(), 3);
        // 2s after the first attempt, 4s after the second, none after the last.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn connection_failure_recovers_on_retry() {
        let mut client = client(ScriptedTransport::new(vec![
            Err(TransportError::Connect("refused".to_string())),
            reply("你好"),
        ]));
        let start = Instant::now();

        assert_eq!(client.translate("hello").await, "你好");
        assert_eq!(client.transport().call_count(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn vendor_rate_limit_uses_longer_backoff() {
        let mut client = client(ScriptedTransport::always(Err(TransportError::Status {
            status: 429,
            body: String::new(),
        })));
        let start = Instant::now();

        assert_eq!(client.translate_with_retries("hello", 3).await, "hello");
        assert_eq!(client.transport().call_count(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(30 + 60));
    }

    #[tokio::test(start_paused = true)]
    async fn other_http_status_is_not_retried() {
        let mut client = client(ScriptedTransport::always(Err(TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        })));
        let start = Instant::now();

        assert_eq!(client.translate("hello").await, "hello");
        assert_eq!(client.transport().call_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_errors_use_fixed_backoff() {
        let mut client = client(ScriptedTransport::always(Err(TransportError::Other(
            "bad json".to_string(),
        ))));
        let start = Instant::now();

        assert_eq!(client.translate_with_retries("hello", 3).await, "hello");
        assert_eq!(client.transport().call_count(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_choices_return_original_text() {
        let mut client = client(ScriptedTransport::always(Ok(ChatResponse::default())));
        assert_eq!(client.translate("hello").await, "hello");
        assert_eq!(client.transport().call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_applies_per_translation_not_per_attempt() {
        let mut client = CompletionClient::new(
            ScriptedTransport::new(vec![
                Err(TransportError::Timeout),
                reply("一"),
                reply("二"),
                reply("三"),
            ]),
            FixedWindowLimiter::new(2, Duration::from_secs(60)),
            CompletionConfig::default(),
        );
        let start = Instant::now();

        assert_eq!(client.translate("one").await, "一");
        assert_eq!(client.translate("two").await, "二");
        assert_eq!(start.elapsed(), Duration::from_secs(2));

        assert_eq!(client.translate("three").await, "三");
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(60), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(61), "elapsed {:?}", elapsed);
    }

    #[test]
    fn backoff_schedule() {
        assert_eq!(
            backoff_for(&TransportError::Timeout, 1),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            backoff_for(&TransportError::Timeout, 2),
            Some(Duration::from_secs(4))
        );
        assert_eq!(
            backoff_for(
                &TransportError::Status {
                    status: 429,
                    body: String::new()
                },
                2
            ),
            Some(Duration::from_secs(60))
        );
        assert_eq!(
            backoff_for(
                &TransportError::Status {
                    status: 503,
                    body: String::new()
                },
                1
            ),
            None
        );
        assert_eq!(
            backoff_for(&TransportError::Other("x".to_string()), 3),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn strip_label_only_removes_leading_label() {
        assert_eq!(strip_label("翻译：你好"), "你好");
        assert_eq!(strip_label("你好，翻译：世界"), "你好，翻译：世界");
        assert_eq!(strip_label("  plain  "), "plain");
    }
}
