//! Artifact materialization.
//!
//! Two variants exist across deployments: raw narration audio, and a
//! captioned video composited over a looping background. Both share the
//! synthesis engine; only the rendering differs.

use std::path::{Path, PathBuf};

use tracing::debug;

use nvox_media::{compose_video, cues_from_words, to_srt};
use nvox_models::JobId;
use nvox_transcribe::TranscribeClient;

use crate::config::{RenderMode, WorkerConfig};
use crate::error::{WorkerError, WorkerResult};

/// Configuration-selected materialization strategy.
pub enum Renderer {
    /// Write raw reassembled audio to the target path
    Audio,
    /// Transcribe, caption, and burn onto a background video
    CaptionedVideo {
        background: PathBuf,
        transcriber: TranscribeClient,
        compose_timeout_secs: u64,
    },
}

impl Renderer {
    /// Build the renderer selected by the worker configuration.
    pub fn from_config(config: &WorkerConfig) -> WorkerResult<Self> {
        match config.render_mode {
            RenderMode::Audio => Ok(Self::Audio),
            RenderMode::CaptionedVideo => {
                let background = config.background_video.clone().ok_or_else(|| {
                    WorkerError::config(
                        "BACKGROUND_VIDEO must be set when RENDER_MODE=captioned_video",
                    )
                })?;
                // Composition requires FFmpeg on PATH
                nvox_media::check_ffmpeg()?;
                Ok(Self::CaptionedVideo {
                    background,
                    transcriber: TranscribeClient::from_env()?,
                    compose_timeout_secs: config.compose_timeout_secs,
                })
            }
        }
    }

    /// File extension of the produced artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Renderer::Audio => "mp3",
            Renderer::CaptionedVideo { .. } => "mp4",
        }
    }

    /// Content type of the produced artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            Renderer::Audio => "audio/mpeg",
            Renderer::CaptionedVideo { .. } => "video/mp4",
        }
    }

    /// Storage key prefix for the produced artifact.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Renderer::Audio => "audio",
            Renderer::CaptionedVideo { .. } => "videos",
        }
    }

    /// Materialize synthesized audio into the artifact at `output`.
    ///
    /// Intermediates live in a scoped temp dir and are removed on every
    /// exit path, success or failure.
    pub async fn render(&self, job_id: &JobId, audio: Vec<u8>, output: &Path) -> WorkerResult<()> {
        match self {
            Renderer::Audio => {
                tokio::fs::write(output, &audio).await?;
                debug!(job_id = %job_id, output = %output.display(), "wrote audio artifact");
                Ok(())
            }
            Renderer::CaptionedVideo {
                background,
                transcriber,
                compose_timeout_secs,
            } => {
                let scratch = tempfile::tempdir()?;

                let audio_name = format!("{job_id}.mp3");
                let audio_path = scratch.path().join(&audio_name);
                tokio::fs::write(&audio_path, &audio).await?;

                let words = transcriber.transcribe(audio, &audio_name).await?;
                debug!(job_id = %job_id, words = words.len(), "transcribed narration");

                let cues =
                    cues_from_words(words.iter().map(|w| (w.word.as_str(), w.start, w.end)));
                let captions_path = scratch.path().join(format!("{job_id}.srt"));
                tokio::fs::write(&captions_path, to_srt(&cues)).await?;

                compose_video(
                    background,
                    &audio_path,
                    &captions_path,
                    output,
                    *compose_timeout_secs,
                )
                .await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_audio_variant_writes_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("job.mp3");
        let job_id = JobId::from_string("job");

        Renderer::Audio
            .render(&job_id, b"narration-bytes".to_vec(), &output)
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"narration-bytes");
    }

    #[test]
    fn test_artifact_naming_per_variant() {
        let audio = Renderer::Audio;
        assert_eq!(audio.extension(), "mp3");
        assert_eq!(audio.content_type(), "audio/mpeg");
        assert_eq!(audio.key_prefix(), "audio");
    }
}
