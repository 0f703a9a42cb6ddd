//! Synthesis error types.

use thiserror::Error;

pub type TtsResult<T> = Result<T, TtsError>;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("text must not be empty")]
    EmptyText,

    #[error("no synthesis endpoints configured")]
    NoEndpoints,

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("endpoint {url} returned status {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("endpoint {url} response is missing audio field '{field}'")]
    MissingField { url: String, field: String },

    #[error("endpoint {url} returned invalid base64 audio: {source}")]
    Decode {
        url: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("all {0} synthesis endpoints failed")]
    AllEndpointsFailed(usize),

    #[error("endpoint configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TtsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
