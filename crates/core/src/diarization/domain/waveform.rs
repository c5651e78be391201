use ndarray::{Array2, ArrayView2};

use crate::shared::sliding_window::SlidingWindow;

/// A dense audio feature buffer of shape `(frames, channels)` plus the
/// [`SlidingWindow`] that maps its rows to wall-clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveformFeature {
    data: Array2<f32>,
    window: SlidingWindow,
}

impl WaveformFeature {
    pub fn new(data: Array2<f32>, window: SlidingWindow) -> Self {
        Self { data, window }
    }

    /// Build a single-channel feature from raw samples.
    pub fn from_mono(samples: Vec<f32>, window: SlidingWindow) -> Self {
        let frames = samples.len();
        let data = Array2::from_shape_vec((frames, 1), samples)
            .expect("sample count must equal frames * 1");
        Self { data, window }
    }

    pub fn data(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn frames(&self) -> usize {
        self.data.nrows()
    }

    pub fn channels(&self) -> usize {
        self.data.ncols()
    }

    /// Flatten the buffer into the 1-D row-major f32 sequence the recognizer
    /// consumes. No resampling happens here; the caller guarantees the chunk
    /// is already at the recognizer's expected sample rate.
    pub fn to_recognizer_buffer(&self) -> Vec<f32> {
        // `iter` walks logical (row-major) order regardless of memory layout
        self.data.iter().copied().collect()
    }
}
