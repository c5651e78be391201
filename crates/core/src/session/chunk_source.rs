use crossbeam_channel::{Receiver, Sender};
use ndarray::Array2;
use thiserror::Error;

use crate::shared::constants::DEFAULT_CHUNK_CAPACITY;

#[derive(Error, Debug)]
#[error("chunk stream for {uri} is closed")]
pub struct ChunkStreamClosed {
    pub uri: String,
}

/// Push side of a bounded audio chunk stream.
///
/// Producers call [`ChunkSource::push`] with raw `(frames, channels)` sample
/// buffers; the processing side drains the paired [`Receiver`]. Pushing
/// blocks once `capacity` chunks are in flight, which makes backpressure
/// explicit instead of buffering unboundedly. Dropping the receiver closes
/// the stream.
pub struct ChunkSource {
    uri: String,
    sample_rate: u32,
    tx: Sender<Array2<f32>>,
}

impl ChunkSource {
    /// Create a source with the default in-flight capacity.
    pub fn new(uri: impl Into<String>, sample_rate: u32) -> (Self, Receiver<Array2<f32>>) {
        Self::with_capacity(uri, sample_rate, DEFAULT_CHUNK_CAPACITY)
    }

    pub fn with_capacity(
        uri: impl Into<String>,
        sample_rate: u32,
        capacity: usize,
    ) -> (Self, Receiver<Array2<f32>>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (
            Self {
                uri: uri.into(),
                sample_rate,
                tx,
            },
            rx,
        )
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Deliver one chunk, blocking while the stream is at capacity.
    pub fn push(&self, chunk: Array2<f32>) -> Result<(), ChunkStreamClosed> {
        self.tx.send(chunk).map_err(|_| ChunkStreamClosed {
            uri: self.uri.clone(),
        })?;
        log::debug!("Chunk received in stream {}", self.uri);
        Ok(())
    }
}
