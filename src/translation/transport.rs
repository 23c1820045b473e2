use crate::utils::{CompletionConfig, Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ChatRequest {
    /// Single user turn carrying one text part.
    pub fn single_turn(model: &str, prompt: String, temperature: f32, max_tokens: usize) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![ContentPart {
                    content_type: "text".to_string(),
                    text: prompt,
                }],
            }],
            temperature,
            max_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, or `None` when there are no choices.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| {
            choice
                .message
                .as_ref()
                .and_then(|m| m.content.as_deref())
                .unwrap_or("")
        })
    }
}

/// One completion attempt against the vendor.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn complete(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Other(e.to_string()))
    }
}
