//! Caption burn and mux composition.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Combine a looping background video, narration audio, and an SRT
/// caption track into a single muxed output file.
///
/// The background loops for as long as the narration runs; the output
/// ends with the audio. A non-zero FFmpeg exit is fatal.
pub async fn compose_video(
    background: &Path,
    audio: &Path,
    captions: &Path,
    output: &Path,
    timeout_secs: u64,
) -> MediaResult<()> {
    for path in [background, audio, captions] {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }
    }

    let cmd = FfmpegCommand::new(output)
        .input_with_args(["-stream_loop", "-1"], background)
        .input(audio)
        .video_filter(format!("subtitles={}", captions.display()))
        .map(0, "v")
        .map(1, "a")
        .video_codec("libx264")
        .audio_codec("aac")
        .shortest();

    FfmpegRunner::new().with_timeout(timeout_secs).run(&cmd).await?;

    info!(output = %output.display(), "composed captioned video");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_inputs_fail_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");
        let out = dir.path().join("out.mp4");

        let err = compose_video(&missing, &missing, &missing, &out, 60)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
