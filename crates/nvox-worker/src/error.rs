//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("synthesis failed: {0}")]
    Tts(#[from] nvox_tts::TtsError),

    #[error("transcription failed: {0}")]
    Transcribe(#[from] nvox_transcribe::TranscribeError),

    #[error("media composition failed: {0}")]
    Media(#[from] nvox_media::MediaError),

    #[error("storage error: {0}")]
    Storage(#[from] nvox_storage::StorageError),

    #[error("store error: {0}")]
    Store(#[from] nvox_store::StoreError),

    #[error("queue error: {0}")]
    Queue(#[from] nvox_queue::QueueError),

    #[error("job lifecycle error: {0}")]
    Status(#[from] nvox_models::StatusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
