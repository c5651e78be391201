use crate::diarization::domain::annotation::TimeAnnotation;
use crate::diarization::domain::waveform::WaveformFeature;

/// Domain interface for a streaming speaker-diarization engine.
///
/// Implementations consume one audio chunk at a time and emit the
/// speaker-labeled annotation aligned with that chunk.
pub trait Diarizer: Send {
    fn diarize(
        &mut self,
        chunk: &WaveformFeature,
    ) -> Result<TimeAnnotation, Box<dyn std::error::Error>>;
}
