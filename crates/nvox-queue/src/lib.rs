//! Redis Streams job queue for NarraVox.
//!
//! This crate provides:
//! - Job enqueueing with idempotency dedup
//! - Single-slot consumption via a consumer group
//! - Claiming of orphaned deliveries (crash recovery)
//! - Unconditional acknowledgment

pub mod error;
pub mod job;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use job::GenerateVideoJob;
pub use queue::{JobQueue, QueueConfig};
