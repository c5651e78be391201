pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub const DEFAULT_WHISPER_MODEL: &str = "tiny.en";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Max gap (seconds) between same-speaker intervals that still collapses
/// into one region.
pub const DEFAULT_COLLAR: f64 = 0.05;

pub const DEFAULT_CHUNK_CAPACITY: usize = 8;

/// Model file name for a whisper model size token, e.g. `"tiny.en"` →
/// `"ggml-tiny.en.bin"`.
pub fn whisper_model_filename(size: &str) -> String {
    format!("ggml-{size}.bin")
}

/// Download URL for a whisper model size token.
pub fn whisper_model_url(size: &str) -> String {
    format!("{WHISPER_MODEL_BASE_URL}/{}", whisper_model_filename(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_model_filename() {
        assert_eq!(whisper_model_filename("tiny.en"), "ggml-tiny.en.bin");
        assert_eq!(whisper_model_filename("large-v1"), "ggml-large-v1.bin");
    }

    #[test]
    fn test_whisper_model_url_joins_base() {
        let url = whisper_model_url("base");
        assert!(url.starts_with(WHISPER_MODEL_BASE_URL));
        assert!(url.ends_with("ggml-base.bin"));
    }
}
