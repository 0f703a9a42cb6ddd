//! Speech synthesis engine for NarraVox.
//!
//! This crate provides:
//! - Prompt chunking under the per-request byte budget
//! - Concurrent per-chunk fetch with ordered reassembly
//! - Strict in-order endpoint failover (no mixed-endpoint audio)
//! - The composed text-to-audio synthesis engine

pub mod chunker;
pub mod client;
pub mod endpoint;
pub mod engine;
pub mod error;

pub use chunker::{split, DEFAULT_CHUNK_LIMIT};
pub use client::SpeechClient;
pub use endpoint::{Endpoint, EndpointList};
pub use engine::SpeechEngine;
pub use error::{TtsError, TtsResult};
