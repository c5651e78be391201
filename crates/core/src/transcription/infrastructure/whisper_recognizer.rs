use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::transcription::domain::recognized_segment::{
    RecognizedSegment, TranscriptionInfo, Word,
};
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Emits one [`RecognizedSegment`] per whisper segment with token-level
/// timestamps. Fields whisper.cpp does not expose through this API
/// (`seek`, `compression_ratio`, `no_speech_prob`) are zeroed so the output
/// document keeps its stable shape.
#[derive(Debug)]
pub struct WhisperRecognizer {
    model_path: PathBuf,
    language: String,
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path, language: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            language: language.to_string(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        samples: &[f32],
    ) -> Result<(Vec<RecognizedSegment>, TranscriptionInfo), Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some(&self.language));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, samples)
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let mut text = String::new();
            let mut tokens = Vec::new();
            let mut words = Vec::new();
            let mut logprob_sum = 0.0f32;

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], [_SOT_], <|endoftext|>, ...)
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                let token_data = token.token_data();

                // Token timestamps are in centiseconds (10ms units)
                let start = token_data.t0 as f64 / 100.0;
                let end = token_data.t1 as f64 / 100.0;
                if end <= start {
                    continue;
                }

                text.push_str(token_text);
                tokens.push(token_data.id);
                logprob_sum += token_data.plog;
                words.push(Word {
                    word: token_text.to_string(),
                    start,
                    end,
                    probability: token.token_probability(),
                });
            }

            if words.is_empty() {
                continue;
            }

            let avg_logprob = logprob_sum / words.len() as f32;
            segments.push(RecognizedSegment {
                seek: 0,
                start: words[0].start,
                end: words[words.len() - 1].end,
                text,
                tokens,
                temperature: 0.0,
                avg_logprob,
                compression_ratio: 0.0,
                no_speech_prob: 0.0,
                id: seg_idx as i32,
                words,
            });
        }

        let info = TranscriptionInfo {
            language: self.language.clone(),
        };
        Ok((segments, info))
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
