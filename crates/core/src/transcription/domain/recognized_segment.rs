use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One recognized word with timing and confidence.
///
/// Serializes with an explicit `"tokens": null` field: the recognizer's
/// word-level output carries no token ids, and downstream consumers expect
/// the key to be present.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub probability: f32,
}

impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Word", 5)?;
        state.serialize_field("word", &self.word)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("probability", &self.probability)?;
        state.serialize_field("tokens", &None::<Vec<i32>>)?;
        state.end()
    }
}

/// One transcription unit as emitted by the recognizer, serialized verbatim
/// into the transcript document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecognizedSegment {
    pub seek: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub tokens: Vec<i32>,
    pub temperature: f32,
    pub avg_logprob: f32,
    pub compression_ratio: f32,
    pub no_speech_prob: f32,
    pub id: i32,
    pub words: Vec<Word>,
}

/// Recognizer run metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptionInfo {
    pub language: String,
}
