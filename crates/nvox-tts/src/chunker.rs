//! Prompt chunking for synthesis requests.
//!
//! Remote speech endpoints only accept short inputs. A prompt is first
//! cut at punctuation boundaries, oversized pieces are re-cut at word
//! boundaries, then consecutive pieces are greedily merged back under
//! the byte budget. Concatenating the returned chunks in order always
//! reproduces the input exactly; nothing is dropped or truncated.

/// Default per-request byte budget accepted by the public endpoints.
pub const DEFAULT_CHUNK_LIMIT: usize = 300;

/// Sentence and clause terminators used by the first split pass.
const BREAK_CHARS: &[char] = &['.', ',', '!', '?', ':', ';', '-'];

/// Split `text` into ordered chunks of at most `limit` UTF-8 bytes.
///
/// A single word longer than `limit` is emitted as its own oversized
/// chunk rather than truncated. Empty input yields one empty chunk
/// (the final flush of an empty accumulator); callers that need
/// non-empty text must validate before chunking.
pub fn split(text: &str, limit: usize) -> Vec<String> {
    // First pass: punctuation boundaries, delimiter kept with its piece.
    // Second pass: word boundaries for any piece over the budget.
    let mut pieces: Vec<&str> = Vec::new();
    for piece in text.split_inclusive(BREAK_CHARS) {
        if piece.len() > limit {
            pieces.extend(piece.split_inclusive(' '));
        } else {
            pieces.push(piece);
        }
    }

    // Greedy accumulation: flush whenever the next piece would overflow.
    let mut chunks = Vec::new();
    let mut current = String::new();
    for piece in pieces {
        if current.len() + piece.len() <= limit {
            current.push_str(piece);
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(piece);
        }
    }
    chunks.push(current);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(chunks: &[String]) -> String {
        chunks.concat()
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = split("Hello world.", DEFAULT_CHUNK_LIMIT);
        assert_eq!(chunks, vec!["Hello world.".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_single_empty_chunk() {
        assert_eq!(split("", DEFAULT_CHUNK_LIMIT), vec![String::new()]);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let inputs = [
            "One sentence. Another sentence! A third?",
            "no punctuation at all just a very plain run of words",
            "line one\nline two\nline three",
            "Comma, separated; clauses: with - dashes.",
            "Ünïcödé — emphatically non-ASCII. ¿Qué tal?",
            "trailing space ",
            " leading and   repeated   spaces",
        ];
        for input in inputs {
            for limit in [10, 25, 300] {
                let chunks = split(input, limit);
                assert_eq!(rejoin(&chunks), input, "limit={limit} input={input:?}");
            }
        }
    }

    #[test]
    fn test_chunks_respect_byte_limit() {
        let text = "The quick brown fox jumps over the lazy dog. \
                    Pack my box with five dozen liquor jugs! \
                    How vexingly quick daft zebras jump?";
        let limit = 40;
        let chunks = split(text, limit);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= limit, "{chunk:?} exceeds {limit}");
        }
        assert_eq!(rejoin(&chunks), text);
    }

    #[test]
    fn test_unsplittable_word_may_exceed_limit() {
        let long_word = "a".repeat(50);
        let text = format!("short bit. {long_word} tail.");
        let chunks = split(&text, 20);
        assert!(chunks.iter().any(|c| c.len() > 20 && c.contains(&long_word)));
        assert_eq!(rejoin(&chunks), text);
    }

    #[test]
    fn test_greedy_merge_fills_chunks() {
        // Four 5-byte pieces fit pairwise under a 12-byte budget.
        let text = "abcd.efgh.ijkl.mnop.";
        let chunks = split(text, 12);
        assert_eq!(chunks, vec!["abcd.efgh.".to_string(), "ijkl.mnop.".to_string()]);
    }

    #[test]
    fn test_multibyte_boundaries_are_respected() {
        // The budget is measured in encoded bytes, not characters.
        let text = "Ärger über Löss. Größe zählt nicht.";
        let chunks = split(text, 16);
        assert!(chunks.len() > 1);
        assert_eq!(rejoin(&chunks), text);
        for chunk in &chunks {
            assert!(chunk.len() <= 16, "{chunk:?} exceeds 16 bytes");
        }
    }
}
