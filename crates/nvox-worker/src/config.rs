//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

use nvox_models::Voice;
use nvox_tts::DEFAULT_CHUNK_LIMIT;

use crate::error::{WorkerError, WorkerResult};

/// Output materialization variant, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Write raw narration audio
    Audio,
    /// Burn per-word captions onto a background video
    CaptionedVideo,
}

impl RenderMode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(Self::Audio),
            "captioned_video" | "video" => Some(Self::CaptionedVideo),
            _ => None,
        }
    }
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory for finished artifacts before upload
    pub output_dir: PathBuf,
    /// Narration voice
    pub voice: Voice,
    /// Per-request chunk byte budget
    pub chunk_limit: usize,
    /// Materialization variant
    pub render_mode: RenderMode,
    /// Background video for the captioned-video variant
    pub background_video: Option<PathBuf>,
    /// Per-request synthesis timeout
    pub tts_timeout: Duration,
    /// FFmpeg composition timeout
    pub compose_timeout_secs: u64,
}

impl WorkerConfig {
    /// Create config from environment variables.
    ///
    /// Every value has a default except the ones the chosen render mode
    /// requires; each missing value fails on its own.
    pub fn from_env() -> WorkerResult<Self> {
        let voice_raw = std::env::var("TTS_VOICE").unwrap_or_else(|_| "en_us_006".to_string());
        let voice: Voice = voice_raw
            .parse()
            .map_err(|e: nvox_models::UnknownVoice| WorkerError::config(e.to_string()))?;

        let mode_raw = std::env::var("RENDER_MODE").unwrap_or_else(|_| "audio".to_string());
        let render_mode = RenderMode::parse(&mode_raw)
            .ok_or_else(|| WorkerError::config(format!("unrecognized RENDER_MODE '{mode_raw}'")))?;

        let background_video = std::env::var("BACKGROUND_VIDEO").ok().map(PathBuf::from);
        if render_mode == RenderMode::CaptionedVideo && background_video.is_none() {
            return Err(WorkerError::config(
                "BACKGROUND_VIDEO must be set when RENDER_MODE=captioned_video",
            ));
        }

        Ok(Self {
            output_dir: std::env::var("VIDEO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./videos")),
            voice,
            chunk_limit: std::env::var("TTS_CHUNK_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_LIMIT),
            render_mode,
            background_video,
            tts_timeout: Duration::from_secs(
                std::env::var("TTS_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            compose_timeout_secs: std::env::var("COMPOSE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_parsing() {
        assert_eq!(RenderMode::parse("audio"), Some(RenderMode::Audio));
        assert_eq!(
            RenderMode::parse("captioned_video"),
            Some(RenderMode::CaptionedVideo)
        );
        assert_eq!(RenderMode::parse("video"), Some(RenderMode::CaptionedVideo));
        assert_eq!(RenderMode::parse("hologram"), None);
    }
}
