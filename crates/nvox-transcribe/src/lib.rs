//! HTTP client for the word-level transcription service.

pub mod client;
pub mod error;
pub mod types;

pub use client::{TranscribeClient, TranscribeConfig};
pub use error::{TranscribeError, TranscribeResult};
pub use types::{TranscriptionResponse, WordSegment};
