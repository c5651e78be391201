use std::path::PathBuf;

use crate::shared::constants::{DEFAULT_COLLAR, WHISPER_SAMPLE_RATE};
use crate::transcription::domain::speaker_turn::SpeakerDisplayMapping;

/// Externally supplied session configuration.
///
/// Everything the core consumes but does not compute: the audio sample rate,
/// the speaker display names, and where the debug artifact goes. Injected
/// into the session rather than read from globals so concurrent streams can
/// carry different settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub sample_rate: u32,
    pub speaker_names: SpeakerDisplayMapping,
    pub temp_path: PathBuf,
    pub collar: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: WHISPER_SAMPLE_RATE,
            speaker_names: SpeakerDisplayMapping::new(),
            temp_path: std::env::temp_dir().join("turnscribe").join("session.wav"),
            collar: DEFAULT_COLLAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.sample_rate, 16000);
        assert!(config.speaker_names.is_empty());
        assert_relative_eq!(config.collar, DEFAULT_COLLAR);
        assert!(config.temp_path.ends_with("turnscribe/session.wav"));
    }
}
