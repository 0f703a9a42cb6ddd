//! Transcription client error types.

use thiserror::Error;

pub type TranscribeResult<T> = Result<T, TranscribeError>;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("transcription request failed: {0}")]
    RequestFailed(String),
}
