//! Synthesis endpoint configuration.
//!
//! Endpoints are tried strictly in list order; the list is loaded once
//! at startup and never changes at runtime.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TtsError, TtsResult};

/// One candidate speech endpoint.
///
/// `response_field` names the JSON field carrying the base64 audio;
/// it is per-endpoint configuration, not a fixed wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Request target.
    pub url: String,
    /// Name of the response field holding encoded audio.
    #[serde(rename = "response")]
    pub response_field: String,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, response_field: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            response_field: response_field.into(),
        }
    }
}

/// Ordered failover list of synthesis endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointList(Vec<Endpoint>);

impl EndpointList {
    /// Build a list, rejecting an empty one.
    pub fn new(endpoints: Vec<Endpoint>) -> TtsResult<Self> {
        if endpoints.is_empty() {
            return Err(TtsError::NoEndpoints);
        }
        Ok(Self(endpoints))
    }

    /// Built-in default endpoints, in failover order.
    pub fn default_endpoints() -> Self {
        Self(vec![
            Endpoint::new(
                "https://tiktok-tts.weilnet.workers.dev/api/generation",
                "data",
            ),
            Endpoint::new("https://gesserit.co/api/tiktok-tts", "base64"),
            Endpoint::new("https://tiktoktts.com/api/tiktok-tts", "audio"),
        ])
    }

    /// Load the list from a JSON file (`[{"url": ..., "response": ...}]`).
    pub fn from_file(path: impl AsRef<Path>) -> TtsResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TtsError::config(format!("cannot read {}: {e}", path.display())))?;
        let endpoints: Vec<Endpoint> = serde_json::from_str(&raw)?;
        Self::new(endpoints)
    }

    /// Load from `TTS_ENDPOINTS_FILE` if set, else the built-in list.
    pub fn from_env() -> TtsResult<Self> {
        match std::env::var("TTS_ENDPOINTS_FILE") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default_endpoints()),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(
            EndpointList::new(Vec::new()),
            Err(TtsError::NoEndpoints)
        ));
    }

    #[test]
    fn test_default_endpoints_ordered() {
        let list = EndpointList::default_endpoints();
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().next().unwrap().response_field, "data");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"url": "http://one.test/tts", "response": "data"}},
                {{"url": "http://two.test/tts", "response": "audio"}}]"#
        )
        .unwrap();

        let list = EndpointList::from_file(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.iter().map(|e| e.url.as_str()).collect::<Vec<_>>(),
            vec!["http://one.test/tts", "http://two.test/tts"]
        );
    }

    #[test]
    fn test_from_missing_file_is_config_error() {
        let err = EndpointList::from_file("/nonexistent/endpoints.json").unwrap_err();
        assert!(matches!(err, TtsError::Config(_)));
    }
}
