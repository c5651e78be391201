use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use turnscribe_core::diarization::domain::annotation::TimeAnnotation;
use turnscribe_core::session::wav_sink;
use turnscribe_core::shared::constants::{
    whisper_model_filename, whisper_model_url, DEFAULT_COLLAR, DEFAULT_WHISPER_MODEL,
    WHISPER_SAMPLE_RATE,
};
use turnscribe_core::shared::model_resolver;
use turnscribe_core::transcription::domain::speaker_turn::{
    to_speaker_turns, SpeakerDisplayMapping,
};
use turnscribe_core::transcription::domain::speech_recognizer::SpeechRecognizer;
use turnscribe_core::transcription::domain::transcript_document::format_transcription;
use turnscribe_core::transcription::domain::turn_builder::TurnBuilder;
use turnscribe_core::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;

/// Speaker-attributed transcription for WAV files.
#[derive(Parser)]
#[command(name = "turnscribe")]
struct Cli {
    /// Input WAV file (16kHz; stereo is downmixed to mono).
    input: PathBuf,

    /// Output JSON file (stdout when omitted).
    output: Option<PathBuf>,

    /// Whisper model size (tiny, base.en, ...) or a path to a ggml model file.
    #[arg(long, default_value = DEFAULT_WHISPER_MODEL)]
    model: String,

    /// Spoken language hint passed to the recognizer.
    #[arg(long, default_value = "en")]
    language: String,

    /// Diarization annotation JSON from the engine; switches output from the
    /// transcript document to speaker-attributed turns.
    #[arg(long)]
    diarization: Option<PathBuf>,

    /// Collar (seconds) for collapsing same-speaker regions of the annotation.
    #[arg(long, default_value_t = DEFAULT_COLLAR)]
    collar: f64,

    /// Speaker display names as id=name pairs (comma-separated).
    #[arg(long, value_delimiter = ',')]
    speaker_names: Option<Vec<String>>,

    /// Also write the decoded audio to this WAV path for debugging.
    #[arg(long)]
    save_audio: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let samples = read_wav_mono(&cli.input)?;

    if let Some(ref save_path) = cli.save_audio {
        wav_sink::persist_batch(&samples, save_path, WHISPER_SAMPLE_RATE)?;
    }

    let model_path = resolve_model(&cli.model)?;
    let recognizer = WhisperRecognizer::new(&model_path, &cli.language)?;
    let (segments, info) = recognizer.transcribe(&samples)?;

    let json = match cli.diarization {
        Some(ref annotation_path) => {
            let annotation: TimeAnnotation =
                serde_json::from_str(&fs::read_to_string(annotation_path)?)?;
            let turns = TurnBuilder::align(&annotation.support(cli.collar), &segments);
            let mapping = parse_speaker_names(cli.speaker_names.as_deref())?;
            serde_json::to_string_pretty(&to_speaker_turns(&turns, &mapping))?
        }
        None => {
            let document = format_transcription(segments, &info);
            serde_json::to_string_pretty(&document)?
        }
    };

    match cli.output {
        Some(ref output) => {
            fs::write(output, json)?;
            log::info!("Output written to {}", output.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Read a WAV file into mono f32 samples at the recognizer's sample rate.
///
/// Multi-channel audio is averaged down to mono. The recognizer does no
/// resampling, so other sample rates are rejected up front.
fn read_wav_mono(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| format!("Failed to open WAV file {}: {e}", path.display()))?;
    let spec = reader.spec();

    if spec.sample_rate != WHISPER_SAMPLE_RATE {
        return Err(format!(
            "Unsupported sample rate {}Hz: resample to {}Hz first",
            spec.sample_rate, WHISPER_SAMPLE_RATE
        )
        .into());
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels as usize;
    if channels <= 1 {
        return Ok(interleaved);
    }
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

/// Resolve a model argument: an existing file path is used directly, any
/// other token is treated as a model size and fetched through the cache.
fn resolve_model(model: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = PathBuf::from(model);
    if path.exists() || model.contains('/') || model.contains('\\') {
        return Ok(path);
    }

    let progress: model_resolver::ProgressFn = Box::new(|downloaded, total| {
        if total > 0 {
            eprint!("\rDownloading model: {downloaded}/{total} bytes");
        }
    });
    let resolved = model_resolver::resolve(
        &whisper_model_filename(model),
        &whisper_model_url(model),
        Some(progress),
    )?;
    eprintln!();
    Ok(resolved)
}

fn parse_speaker_names(
    pairs: Option<&[String]>,
) -> Result<SpeakerDisplayMapping, Box<dyn std::error::Error>> {
    let mut mapping = SpeakerDisplayMapping::new();
    for pair in pairs.unwrap_or_default() {
        let (id, name) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid speaker name mapping '{pair}': expected id=name"))?;
        let id: i32 = id
            .trim()
            .parse()
            .map_err(|e| format!("Invalid speaker id in '{pair}': {e}"))?;
        mapping.insert(id, name.trim().to_string());
    }
    Ok(mapping)
}
