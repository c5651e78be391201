use ndarray::{concatenate, Axis};
use thiserror::Error;

use crate::diarization::domain::annotation::TimeAnnotation;
use crate::diarization::domain::waveform::WaveformFeature;
use crate::shared::constants::DEFAULT_COLLAR;
use crate::shared::sliding_window::SlidingWindow;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("cannot merge an empty chunk sequence")]
    EmptyInput,
    #[error(
        "sliding window mismatch at chunk {index}: \
         duration={duration}/step={step}, expected duration={expected_duration}/step={expected_step}"
    )]
    SampleRateMismatch {
        index: usize,
        duration: f64,
        step: f64,
        expected_duration: f64,
        expected_step: f64,
    },
    #[error("waveform shapes are not concatenable: {0}")]
    ShapeMismatch(#[source] ndarray::ShapeError),
}

/// Fuses a sequence of per-chunk `(annotation, waveform)` pairs into one
/// coherent pair, collapsing same-speaker regions separated by pauses
/// shorter than the collar.
pub struct ChunkMerger {
    collar: f64,
}

impl ChunkMerger {
    pub fn new(collar: f64) -> Self {
        Self { collar }
    }

    pub fn collar(&self) -> f64 {
        self.collar
    }

    /// Merge chunks in input order.
    ///
    /// Annotations are unioned into a running annotation carrying the first
    /// chunk's stream identity, then collapsed per speaker with the collar.
    /// Waveform buffers are concatenated along the time axis; the output
    /// window reuses the first chunk's `duration`/`step`/`start`, so the
    /// merged feature stays anchored to the first chunk's origin; callers
    /// needing absolute offsets for later chunks track them externally.
    ///
    /// Inputs are not mutated.
    pub fn merge(
        &self,
        chunks: &[(TimeAnnotation, WaveformFeature)],
    ) -> Result<(TimeAnnotation, WaveformFeature), MergeError> {
        let (first_annotation, first_waveform) = chunks.first().ok_or(MergeError::EmptyInput)?;
        let reference = *first_waveform.window();
        for (index, (_, waveform)) in chunks.iter().enumerate() {
            let window = waveform.window();
            if !window.same_resolution(&reference) {
                return Err(MergeError::SampleRateMismatch {
                    index,
                    duration: window.duration,
                    step: window.step,
                    expected_duration: reference.duration,
                    expected_step: reference.step,
                });
            }
        }

        let mut annotation = TimeAnnotation::new(first_annotation.uri());
        for (chunk_annotation, _) in chunks {
            annotation.update(chunk_annotation);
        }
        let annotation = annotation.support(self.collar);

        let views: Vec<_> = chunks.iter().map(|(_, w)| w.data()).collect();
        let data = concatenate(Axis(0), &views).map_err(MergeError::ShapeMismatch)?;

        let window = SlidingWindow::new(reference.duration, reference.step, reference.start);
        Ok((annotation, WaveformFeature::new(data, window)))
    }
}

impl Default for ChunkMerger {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAR)
    }
}
