//! FFmpeg wrapper for NarraVox.
//!
//! This crate provides:
//! - FFmpeg command builder and runner
//! - SRT caption track generation from word timings
//! - Caption-burn + mux composition for the video variant

pub mod captions;
pub mod command;
pub mod compose;
pub mod error;

pub use captions::{cues_from_words, format_timestamp, to_srt, Cue};
pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use compose::compose_video;
pub use error::{MediaError, MediaResult};
