use thiserror::Error;

#[derive(Error, Debug)]
pub enum CultureBridgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, CultureBridgeError>;

/// Outcome of a single completion attempt that did not yield a response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TransportError::Status { status: 429, .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            TransportError::Other(e.to_string())
        }
    }
}
