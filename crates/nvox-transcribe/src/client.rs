//! Transcription service HTTP client.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::error::{TranscribeError, TranscribeResult};
use crate::types::{TranscriptionResponse, WordSegment};

/// Configuration for the transcription client.
#[derive(Debug, Clone)]
pub struct TranscribeConfig {
    /// Base URL of the transcription service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            // Transcribing minutes of narration takes a while
            timeout: Duration::from_secs(120),
        }
    }
}

impl TranscribeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TRANSCRIBE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            timeout: Duration::from_secs(
                std::env::var("TRANSCRIBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

/// Client for the word-level transcription service.
#[derive(Debug, Clone)]
pub struct TranscribeClient {
    http: Client,
    config: TranscribeConfig,
}

impl TranscribeClient {
    /// Create a new transcription client.
    pub fn new(config: TranscribeConfig) -> TranscribeResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> TranscribeResult<Self> {
        Self::new(TranscribeConfig::from_env())
    }

    /// Transcribe audio bytes into word-level segments.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> TranscribeResult<Vec<WordSegment>> {
        let url = format!("{}/transcribe", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, bytes = audio.len(), "sending transcription request");

        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")?;
        let form = Form::new().part("file", part);

        let response = self.http.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::RequestFailed(format!(
                "transcription service returned {status}: {body}"
            )));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(parsed.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TranscribeClient {
        TranscribeClient::new(TranscribeConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_transcribe_parses_word_segments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": [
                    { "word": "Hello", "start": 0.0, "end": 0.42 },
                    { "word": "world", "start": 0.42, "end": 0.85 }
                ]
            })))
            .mount(&server)
            .await;

        let words = client_for(&server)
            .transcribe(b"fake-audio".to_vec(), "job.mp3")
            .await
            .unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "Hello");
        assert!((words[1].end - 0.85).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(b"fake-audio".to_vec(), "job.mp3")
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::RequestFailed(_)));
    }
}
