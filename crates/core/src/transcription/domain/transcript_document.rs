use serde::Serialize;

use crate::transcription::domain::recognized_segment::{RecognizedSegment, TranscriptionInfo};

/// The canonical JSON-serializable transcript: `{language, text, segments}`.
///
/// `text` is the ordered concatenation of every segment's text with no
/// separator inserted; segment texts already carry their own leading and
/// trailing whitespace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptDocument {
    pub language: String,
    pub text: String,
    pub segments: Vec<RecognizedSegment>,
}

/// Concatenate segment texts in order, with no inserted separators.
pub fn concatenate_segments(segments: &[RecognizedSegment]) -> String {
    let mut text = String::new();
    for segment in segments {
        text.push_str(&segment.text);
    }
    text
}

/// Build the transcript document from recognizer output.
pub fn format_transcription(
    segments: Vec<RecognizedSegment>,
    info: &TranscriptionInfo,
) -> TranscriptDocument {
    let text = concatenate_segments(&segments);
    TranscriptDocument {
        language: info.language.clone(),
        text,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::domain::recognized_segment::Word;

    fn segment(id: i32, text: &str, start: f64, end: f64) -> RecognizedSegment {
        RecognizedSegment {
            seek: 0,
            start,
            end,
            text: text.to_string(),
            tokens: vec![],
            temperature: 0.0,
            avg_logprob: -0.3,
            compression_ratio: 1.0,
            no_speech_prob: 0.01,
            id,
            words: vec![Word {
                word: text.to_string(),
                start,
                end,
                probability: 0.95,
            }],
        }
    }

    #[test]
    fn test_concatenate_no_separator_inserted() {
        let segments = vec![
            segment(0, " Hello,", 0.0, 0.8),
            segment(1, " world.", 0.8, 1.4),
        ];
        assert_eq!(concatenate_segments(&segments), " Hello, world.");
    }

    #[test]
    fn test_concatenate_empty_input() {
        assert_eq!(concatenate_segments(&[]), "");
    }

    #[test]
    fn test_format_transcription_carries_language() {
        let info = TranscriptionInfo {
            language: "en".to_string(),
        };
        let doc = format_transcription(vec![segment(0, " hi", 0.0, 0.4)], &info);
        assert_eq!(doc.language, "en");
        assert_eq!(doc.text, " hi");
        assert_eq!(doc.segments.len(), 1);
    }

    #[test]
    fn test_document_json_shape() {
        let info = TranscriptionInfo {
            language: "en".to_string(),
        };
        let doc = format_transcription(
            vec![segment(0, " one", 0.0, 0.5), segment(1, " two", 0.5, 1.0)],
            &info,
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["text"], " one two");
        assert_eq!(json["segments"].as_array().unwrap().len(), 2);
        assert!(json["segments"][0]["words"][0]["tokens"].is_null());
    }

    #[test]
    fn test_format_preserves_segment_order() {
        let info = TranscriptionInfo {
            language: "de".to_string(),
        };
        let doc = format_transcription(
            vec![segment(3, " c", 2.0, 3.0), segment(1, " a", 0.0, 1.0)],
            &info,
        );
        // Order is the recognizer's, never re-sorted
        assert_eq!(doc.segments[0].id, 3);
        assert_eq!(doc.text, " c a");
    }
}
