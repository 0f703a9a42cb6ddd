//! Queue payload for generation jobs.

use serde::{Deserialize, Serialize};

/// Payload published by the producer: one prompt to narrate.
///
/// Both fields are required; a payload missing either fails to parse
/// and is acked away by the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideoJob {
    /// Job id, also the durable record key
    pub id: String,
    /// Prompt text to synthesize
    pub prompt: String,
}

impl GenerateVideoJob {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }

    /// Idempotency key for enqueue deduplication.
    pub fn idempotency_key(&self) -> String {
        format!("generate:{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_roundtrip() {
        let job: GenerateVideoJob =
            serde_json::from_str(r#"{"id": "j-1", "prompt": "Tell me a story."}"#).unwrap();
        assert_eq!(job.id, "j-1");
        assert_eq!(job.prompt, "Tell me a story.");
    }

    #[test]
    fn test_missing_fields_fail_to_parse() {
        assert!(serde_json::from_str::<GenerateVideoJob>(r#"{"id": "j-1"}"#).is_err());
        assert!(serde_json::from_str::<GenerateVideoJob>(r#"{"prompt": "x"}"#).is_err());
    }

    #[test]
    fn test_idempotency_key() {
        let job = GenerateVideoJob::new("j-1", "x");
        assert_eq!(job.idempotency_key(), "generate:j-1");
    }
}
