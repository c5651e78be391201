use serde::{Deserialize, Serialize};

/// Maps waveform buffer rows to wall-clock time.
///
/// A row `i` covers `[start + i * step, start + i * step + duration)`.
/// `duration` and `step` encode the feature resolution; two windows with the
/// same resolution may still differ in `start` when they describe different
/// positions in the stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidingWindow {
    pub duration: f64,
    pub step: f64,
    pub start: f64,
}

impl SlidingWindow {
    pub fn new(duration: f64, step: f64, start: f64) -> Self {
        Self {
            duration,
            step,
            start,
        }
    }

    /// Whether two windows share `duration` and `step` (sample-rate
    /// consistency); `start` is allowed to differ.
    pub fn same_resolution(&self, other: &SlidingWindow) -> bool {
        self.duration == other.duration && self.step == other.step
    }

    /// Wall-clock time of a row's leading edge.
    pub fn time_at(&self, row: usize) -> f64 {
        self.start + row as f64 * self.step
    }
}
