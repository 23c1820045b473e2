use crate::utils::{BaiduConfig, CultureBridgeError, Result};
use md5::{Digest, Md5};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// Prefix of every user-facing failure string.
pub const FAILURE_PREFIX: &str = "Translation failed: ";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SALT_MIN: u32 = 32768;
const SALT_MAX: u32 = 65536;

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    trans_result: Option<Vec<TransResult>>,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransResult {
    dst: String,
}

/// Vendor code for a source language; unknown codes ask the vendor to detect.
pub fn vendor_source_code(lang: &str) -> &'static str {
    vendor_code(lang).unwrap_or("auto")
}

/// Vendor code for a target language; unknown codes fall back to Chinese.
pub fn vendor_target_code(lang: &str) -> &'static str {
    vendor_code(lang).unwrap_or("zh")
}

fn vendor_code(lang: &str) -> Option<&'static str> {
    match lang {
        "zh" => Some("zh"),
        "en" => Some("en"),
        "de" => Some("de"),
        "ja" => Some("jp"),
        "ko" => Some("kor"),
        _ => None,
    }
}

/// `md5(app_id + text + salt + secret)` as lowercase hex.
pub fn sign(app_id: &str, text: &str, salt: u32, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(app_id.as_bytes());
    hasher.update(text.as_bytes());
    hasher.update(salt.to_string().as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct BaiduTranslator {
    client: Client,
    config: BaiduConfig,
}

impl BaiduTranslator {
    pub fn new(config: BaiduConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Translates `text`. Never fails: vendor and transport errors come back
    /// as a string starting with [`FAILURE_PREFIX`].
    pub async fn translate(&self, text: &str, src_lang: &str, target_lang: &str) -> String {
        match self.request(text, src_lang, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, "Vendor translation failed");
                format!("{}{}", FAILURE_PREFIX, failure_detail(&e))
            }
        }
    }

    async fn request(&self, text: &str, src_lang: &str, target_lang: &str) -> Result<String> {
        let from = vendor_source_code(src_lang);
        let to = vendor_target_code(target_lang);
        let salt: u32 = rand::thread_rng().gen_range(SALT_MIN..=SALT_MAX);
        let signature = sign(&self.config.app_id, text, salt, &self.config.secret_key);
        let salt = salt.to_string();

        debug!(from, to, "Calling vendor translation API");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", text),
                ("from", from),
                ("to", to),
                ("appid", self.config.app_id.as_str()),
                ("salt", salt.as_str()),
                ("sign", signature.as_str()),
            ])
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let body: BaiduResponse = serde_json::from_str(&response.text().await?)?;

        match body.trans_result.and_then(|r| r.into_iter().next()) {
            Some(first) => Ok(first.dst),
            None => Err(CultureBridgeError::ApiError(
                body.error_msg.unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }
}

/// Vendor messages are shown as sent; transport and decoding errors keep
/// their category.
fn failure_detail(error: &CultureBridgeError) -> String {
    match error {
        CultureBridgeError::ApiError(message) => message.clone(),
        CultureBridgeError::HttpError(e) => e.to_string(),
        other => other.to_string(),
    }
}
