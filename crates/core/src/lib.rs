//! turnscribe-core: speaker-attributed transcription adapter.
//!
//! Merges streaming diarization output (speaker-labeled time intervals plus
//! aligned waveform chunks) and reformats recognizer output into a stable
//! JSON transcript with speaker-attributed turns. The inference engines
//! themselves sit behind domain traits; this crate owns the merging,
//! alignment, and formatting in between.

pub mod diarization;
pub mod session;
pub mod shared;
pub mod transcription;
