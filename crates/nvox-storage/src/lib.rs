//! S3-compatible artifact store client for NarraVox.

pub mod client;
pub mod error;

pub use client::{ArtifactStore, StorageConfig};
pub use error::{StorageError, StorageResult};
