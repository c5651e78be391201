use crate::diarization::domain::annotation::TimeAnnotation;
use crate::diarization::domain::chunk_merger::{ChunkMerger, MergeError};
use crate::diarization::domain::waveform::WaveformFeature;
use crate::session::config::SessionConfig;
use crate::session::wav_sink;

/// Per-stream accumulation state.
///
/// Collects `(annotation, waveform)` pairs as the diarization engine emits
/// them and merges everything seen so far on demand. One session per stream;
/// the caller serializes pushes, so no locking is needed here.
pub struct Session {
    config: SessionConfig,
    merger: ChunkMerger,
    chunks: Vec<(TimeAnnotation, WaveformFeature)>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let merger = ChunkMerger::new(config.collar);
        Self {
            config,
            merger,
            chunks: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn push_chunk(&mut self, annotation: TimeAnnotation, waveform: WaveformFeature) {
        self.chunks.push((annotation, waveform));
    }

    /// Merge everything accumulated so far into one coherent
    /// annotation/waveform pair. Fails when nothing has been pushed yet or
    /// when chunks disagree on window resolution.
    pub fn merged(&self) -> Result<(TimeAnnotation, WaveformFeature), MergeError> {
        self.merger.merge(&self.chunks)
    }

    /// Persist the merged audio to the configured temp path for debugging.
    pub fn persist_merged(&self) -> Result<(), Box<dyn std::error::Error>> {
        let (_, waveform) = self.merged()?;
        wav_sink::persist_batch(
            &waveform.to_recognizer_buffer(),
            &self.config.temp_path,
            self.config.sample_rate,
        )?;
        Ok(())
    }

    /// End the session and remove its temp artifacts. Cleanup never fails;
    /// problems are logged and swallowed.
    pub fn finish(self) {
        wav_sink::cleanup_session(&self.config.temp_path);
    }
}
