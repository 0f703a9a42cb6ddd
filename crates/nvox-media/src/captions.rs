//! SRT caption track generation.
//!
//! One cue per transcribed word, timestamps in `HH:MM:SS,mmm`,
//! non-decreasing across the whole track.

use std::fmt::Write as _;

/// A single caption cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    /// Caption text.
    pub text: String,
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(total_secs: f64) -> String {
    let millis = (total_secs.max(0.0) * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let mins = millis % 3_600_000 / 60_000;
    let secs = millis % 60_000 / 1000;
    let ms = millis % 1000;
    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}

/// Build cues from word timings, preserving word order and clamping so
/// timestamps never move backwards across the sequence.
pub fn cues_from_words<'a>(words: impl IntoIterator<Item = (&'a str, f64, f64)>) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut cursor = 0.0_f64;
    for (text, start, end) in words {
        let start = start.max(cursor);
        let end = end.max(start);
        cursor = end;
        cues.push(Cue {
            start,
            end,
            text: text.to_string(),
        });
    }
    cues
}

/// Render cues as an SRT document.
pub fn to_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        let _ = writeln!(out, "{}", i + 1);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timestamp(cue.start),
            format_timestamp(cue.end)
        );
        let _ = writeln!(out, "{}", cue.text);
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(1.5), "00:00:01,500");
        assert_eq!(format_timestamp(61.042), "00:01:01,042");
        assert_eq!(format_timestamp(3661.25), "01:01:01,250");
    }

    #[test]
    fn test_negative_offsets_clamp_to_zero() {
        assert_eq!(format_timestamp(-2.0), "00:00:00,000");
    }

    #[test]
    fn test_cues_preserve_word_order() {
        let cues = cues_from_words([("Hello", 0.0, 0.4), ("world", 0.4, 0.9)]);
        assert_eq!(
            cues.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
            vec!["Hello", "world"]
        );
    }

    #[test]
    fn test_cues_never_move_backwards() {
        // Overlapping / regressed timings from the transcriber must be
        // clamped into a non-decreasing sequence.
        let cues = cues_from_words([
            ("one", 0.0, 0.5),
            ("two", 0.3, 0.4),
            ("three", 0.2, 1.0),
        ]);
        let mut cursor = 0.0;
        for cue in &cues {
            assert!(cue.start >= cursor);
            assert!(cue.end >= cue.start);
            cursor = cue.end;
        }
    }

    #[test]
    fn test_srt_document_shape() {
        let cues = cues_from_words([("Hello", 0.0, 0.4), ("world", 0.4, 0.9)]);
        let srt = to_srt(&cues);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:00,400\nHello\n\n\
             2\n00:00:00,400 --> 00:00:00,900\nworld\n\n"
        );
    }

    #[test]
    fn test_empty_track_renders_empty() {
        assert_eq!(to_srt(&[]), "");
    }
}
