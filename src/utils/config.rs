use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{CultureBridgeError, Result};

pub const ENV_BAIDU_APP_ID: &str = "BAIDU_APP_ID";
pub const ENV_BAIDU_SECRET_KEY: &str = "BAIDU_SECRET_KEY";
pub const ENV_COMPLETION_API_KEY: &str = "COMPLETION_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub baidu: BaiduConfig,
    pub completion: CompletionConfig,
    pub rate_limit: RateLimitConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaiduConfig {
    pub endpoint: String,
    pub app_id: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_tokens: usize,
    pub max_retries: usize,
}

/// Fixed-window quota applied to completion calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub inputs: Vec<BatchInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for BaiduConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string(),
            app_id: String::new(),
            secret_key: String::new(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.infini-ai.com/maas/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "qwen2.5-7b-instruct".to_string(),
            timeout_seconds: 60,
            temperature: 0.1,
            max_tokens: 1000,
            max_retries: 3,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("translated_utterances"),
            inputs: vec![
                BatchInput {
                    name: "train".to_string(),
                    path: PathBuf::from("train.csv"),
                },
                BatchInput {
                    name: "test".to_string(),
                    path: PathBuf::from("test.csv"),
                },
            ],
        }
    }
}

impl BatchInput {
    pub fn output_file_name(&self) -> String {
        format!("translated_{}.csv", self.name)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).exists() {
            return Err(CultureBridgeError::FileNotFound(path.to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CultureBridgeError::ConfigError(e.to_string()))
    }

    /// Loads `path`, falling back to defaults when it cannot be used, then
    /// applies environment overrides for credentials. The load error is
    /// handed back so the caller can report it once logging is up.
    pub fn load_or_default(path: &str) -> (Self, Option<CultureBridgeError>) {
        let (mut config, error) = match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        (config, error)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BAIDU_APP_ID) {
            self.baidu.app_id = v;
        }
        if let Some(v) = lookup(ENV_BAIDU_SECRET_KEY) {
            self.baidu.secret_key = v;
        }
        if let Some(v) = lookup(ENV_COMPLETION_API_KEY) {
            self.completion.api_key = v;
        }
    }
}
