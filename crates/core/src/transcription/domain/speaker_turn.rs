use std::collections::HashMap;

use serde::Serialize;

/// One contiguous attributed utterance by a single speaker.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeakerTurn {
    pub speaker: i32,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Integer speaker id → human-readable display name. Ids without an entry
/// pass through as the raw integer.
pub type SpeakerDisplayMapping = HashMap<i32, String>;

/// Display identity of a speaker in serialized output: the configured name
/// when one exists, otherwise the raw id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpeakerName {
    Named(String),
    Id(i32),
}

/// One turn in the serialized speaker-attributed output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributedTurn {
    pub speaker: SpeakerName,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Extract a speaker id from an engine label by parsing its trailing two
/// characters as a base-10 integer (`"SPEAKER_07"` → 7).
///
/// Malformed labels are a recoverable condition: the sentinel `-1` is
/// returned and a warning logged, never an error.
pub fn extract_speaker_id(label: &str) -> i32 {
    let tail_start = label
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    match label[tail_start..].parse::<i32>() {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Couldn't extract speaker id from label {label:?}: {e}");
            -1
        }
    }
}

/// Map speaker ids to display names, preserving input order.
pub fn to_speaker_turns(
    turns: &[SpeakerTurn],
    mapping: &SpeakerDisplayMapping,
) -> Vec<AttributedTurn> {
    turns
        .iter()
        .map(|turn| AttributedTurn {
            speaker: match mapping.get(&turn.speaker) {
                Some(name) => SpeakerName::Named(name.clone()),
                None => SpeakerName::Id(turn.speaker),
            },
            text: turn.text.clone(),
            start: turn.start,
            end: turn.end,
        })
        .collect()
}
