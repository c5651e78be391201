use crate::transcription::domain::recognized_segment::{RecognizedSegment, TranscriptionInfo};

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on a flat f32 sample buffer (already at the
/// recognizer's expected sample rate) and emit timed segments plus run
/// metadata.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        samples: &[f32],
    ) -> Result<(Vec<RecognizedSegment>, TranscriptionInfo), Box<dyn std::error::Error>>;
}
