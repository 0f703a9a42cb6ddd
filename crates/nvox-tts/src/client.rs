//! Speech endpoint client: concurrent chunk fetch and in-order failover.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, warn};

use nvox_models::Voice;

use crate::endpoint::{Endpoint, EndpointList};
use crate::error::{TtsError, TtsResult};

/// Request body accepted by every speech endpoint.
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

/// HTTP client for the speech endpoints.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    http: reqwest::Client,
}

impl SpeechClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> TtsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TtsError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Fetch and decode the audio for a single chunk from one endpoint.
    async fn fetch_chunk(&self, endpoint: &Endpoint, text: &str, voice: Voice) -> TtsResult<Vec<u8>> {
        let response = self
            .http
            .post(&endpoint.url)
            .json(&SynthesisRequest {
                text,
                voice: voice.as_str(),
            })
            .send()
            .await
            .map_err(|e| TtsError::Http {
                url: endpoint.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::BadStatus {
                url: endpoint.url.clone(),
                status,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| TtsError::Http {
            url: endpoint.url.clone(),
            source: e,
        })?;

        let encoded = body
            .get(&endpoint.response_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| TtsError::MissingField {
                url: endpoint.url.clone(),
                field: endpoint.response_field.clone(),
            })?;

        BASE64.decode(encoded).map_err(|e| TtsError::Decode {
            url: endpoint.url.clone(),
            source: e,
        })
    }

    /// Fetch every chunk from one endpoint, all requests in flight
    /// concurrently.
    ///
    /// Fragments come back in chunk order regardless of completion
    /// order. The first failure fails the whole call; no partial result
    /// is surfaced and no individual chunk is retried.
    pub async fn fetch_all(
        &self,
        endpoint: &Endpoint,
        chunks: &[String],
        voice: Voice,
    ) -> TtsResult<Vec<Vec<u8>>> {
        try_join_all(
            chunks
                .iter()
                .map(|chunk| self.fetch_chunk(endpoint, chunk, voice)),
        )
        .await
    }

    /// Try endpoints in order until one succeeds for the entire chunk
    /// set.
    ///
    /// Audio from different endpoints is never mixed: an endpoint that
    /// fails any chunk is discarded wholesale and the next candidate
    /// starts from scratch.
    pub async fn synthesize(
        &self,
        chunks: &[String],
        voice: Voice,
        endpoints: &EndpointList,
    ) -> TtsResult<Vec<u8>> {
        for endpoint in endpoints.iter() {
            match self.fetch_all(endpoint, chunks, voice).await {
                Ok(fragments) => {
                    debug!(
                        url = %endpoint.url,
                        chunks = chunks.len(),
                        "endpoint produced all fragments"
                    );
                    return Ok(fragments.concat());
                }
                Err(e) => {
                    warn!(url = %endpoint.url, error = %e, "endpoint failed, trying next");
                }
            }
        }
        Err(TtsError::AllEndpointsFailed(endpoints.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn b64(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    fn client() -> SpeechClient {
        SpeechClient::new(Duration::from_secs(5)).unwrap()
    }

    fn chunk_strings(chunks: &[&str]) -> Vec<String> {
        chunks.iter().map(|s| s.to_string()).collect()
    }

    async fn mock_chunk(server: &MockServer, field: &str, text: &str, audio: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(body_partial_json(json!({ "text": text })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ field: b64(audio) })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_all_reassembles_in_chunk_order() {
        let server = MockServer::start().await;
        let chunks = chunk_strings(&["first. ", "second. ", "third."]);

        // The first chunk's response arrives last; order must not change.
        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(body_partial_json(json!({ "text": "first. " })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": b64(b"AAA") }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        mock_chunk(&server, "data", "second. ", b"BBB").await;
        mock_chunk(&server, "data", "third.", b"CCC").await;

        let endpoint = Endpoint::new(format!("{}/tts", server.uri()), "data");
        let fragments = client().fetch_all(&endpoint, &chunks, Voice::UsMale1).await.unwrap();

        assert_eq!(fragments, vec![b"AAA".to_vec(), b"BBB".to_vec(), b"CCC".to_vec()]);
    }

    #[tokio::test]
    async fn test_fetch_all_fails_on_any_chunk_failure() {
        let server = MockServer::start().await;
        let chunks = chunk_strings(&["ok. ", "broken."]);

        mock_chunk(&server, "data", "ok. ", b"AAA").await;
        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(body_partial_json(json!({ "text": "broken." })))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let endpoint = Endpoint::new(format!("{}/tts", server.uri()), "data");
        let err = client().fetch_all(&endpoint, &chunks, Voice::UsMale1).await.unwrap_err();
        assert!(matches!(err, TtsError::BadStatus { .. }));
    }

    #[tokio::test]
    async fn test_missing_response_field_is_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": "zzz" })))
            .mount(&server)
            .await;

        let endpoint = Endpoint::new(format!("{}/tts", server.uri()), "data");
        let err = client()
            .fetch_all(&endpoint, &chunk_strings(&["hi."]), Voice::UsMale1)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_failover_discards_partial_endpoint_results() {
        // Endpoint A serves chunks 1 and 3 but fails chunk 2; endpoint B
        // serves all three. The result must be B's audio only.
        let server_a = MockServer::start().await;
        let server_b = MockServer::start().await;
        let chunks = chunk_strings(&["one. ", "two. ", "three."]);

        mock_chunk(&server_a, "data", "one. ", b"a1").await;
        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(body_partial_json(json!({ "text": "two. " })))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server_a)
            .await;
        mock_chunk(&server_a, "data", "three.", b"a3").await;

        mock_chunk(&server_b, "audio", "one. ", b"b1").await;
        mock_chunk(&server_b, "audio", "two. ", b"b2").await;
        mock_chunk(&server_b, "audio", "three.", b"b3").await;

        let endpoints = EndpointList::new(vec![
            Endpoint::new(format!("{}/tts", server_a.uri()), "data"),
            Endpoint::new(format!("{}/tts", server_b.uri()), "audio"),
        ])
        .unwrap();

        let audio = client()
            .synthesize(&chunks, Voice::UsMale1, &endpoints)
            .await
            .unwrap();
        assert_eq!(audio, b"b1b2b3".to_vec());
    }

    #[tokio::test]
    async fn test_first_successful_endpoint_wins() {
        let server_a = MockServer::start().await;
        let server_b = MockServer::start().await;
        let chunks = chunk_strings(&["solo."]);

        mock_chunk(&server_a, "data", "solo.", b"from-a").await;
        mock_chunk(&server_b, "audio", "solo.", b"from-b").await;

        let endpoints = EndpointList::new(vec![
            Endpoint::new(format!("{}/tts", server_a.uri()), "data"),
            Endpoint::new(format!("{}/tts", server_b.uri()), "audio"),
        ])
        .unwrap();

        let audio = client()
            .synthesize(&chunks, Voice::UsMale1, &endpoints)
            .await
            .unwrap();
        assert_eq!(audio, b"from-a".to_vec());
        assert!(server_b.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_endpoints_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let endpoints = EndpointList::new(vec![
            Endpoint::new(format!("{}/tts", server.uri()), "data"),
            Endpoint::new("http://127.0.0.1:1/tts".to_string(), "data"),
        ])
        .unwrap();

        let err = client()
            .synthesize(&chunk_strings(&["hi."]), Voice::UsMale1, &endpoints)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::AllEndpointsFailed(2)));
    }
}
