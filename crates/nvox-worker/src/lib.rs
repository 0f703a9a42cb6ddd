//! Narration generation worker.
//!
//! This crate provides:
//! - Worker configuration and materialization mode selection
//! - The single-slot job runner with unconditional acknowledgment
//! - The per-job pipeline: mark, synthesize, render, upload, mark
//! - Graceful shutdown

pub mod config;
pub mod error;
pub mod executor;
pub mod processor;
pub mod render;

pub use config::{RenderMode, WorkerConfig};
pub use error::{WorkerError, WorkerResult};
pub use executor::Executor;
pub use processor::{process_job, ProcessingContext};
pub use render::Renderer;
