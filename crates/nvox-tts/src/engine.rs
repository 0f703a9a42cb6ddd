//! Synthesis engine: validate, chunk, synthesize with failover.

use tracing::debug;

use nvox_models::Voice;

use crate::chunker;
use crate::client::SpeechClient;
use crate::endpoint::EndpointList;
use crate::error::{TtsError, TtsResult};

/// Composed text-to-audio engine.
///
/// Validation happens before any chunking or network activity; the
/// voice is already a closed enum value, so only the text needs
/// checking here.
pub struct SpeechEngine {
    client: SpeechClient,
    endpoints: EndpointList,
    chunk_limit: usize,
}

impl SpeechEngine {
    pub fn new(client: SpeechClient, endpoints: EndpointList, chunk_limit: usize) -> Self {
        Self {
            client,
            endpoints,
            chunk_limit,
        }
    }

    /// Convert `text` into a single audio byte sequence.
    ///
    /// Either every chunk succeeds against one endpoint, or the call
    /// fails; no partial or mixed-endpoint audio is ever returned.
    pub async fn synthesize(&self, text: &str, voice: Voice) -> TtsResult<Vec<u8>> {
        if text.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let chunks = chunker::split(text, self.chunk_limit);
        debug!(
            chunks = chunks.len(),
            text_len = text.len(),
            voice = %voice,
            "prompt chunked for synthesis"
        );

        self.client.synthesize(&chunks, voice, &self.endpoints).await
    }
}
