use crate::diarization::domain::annotation::{SpeakerInterval, TimeAnnotation};
use crate::transcription::domain::recognized_segment::RecognizedSegment;
use crate::transcription::domain::speaker_turn::{extract_speaker_id, SpeakerTurn};

/// Builds ordered speaker turns by aligning diarization intervals with
/// recognized segments.
pub struct TurnBuilder;

impl TurnBuilder {
    /// Attribute each segment to the speaker interval with the largest time
    /// overlap, then coalesce consecutive segments by the same speaker into
    /// one turn.
    ///
    /// Segments with no overlapping speaker interval are skipped. Output is
    /// chronological because segment order is preserved and never re-sorted.
    pub fn align(annotation: &TimeAnnotation, segments: &[RecognizedSegment]) -> Vec<SpeakerTurn> {
        let mut turns: Vec<SpeakerTurn> = Vec::new();

        for segment in segments {
            let interval =
                match best_overlap(annotation.intervals(), segment.start, segment.end) {
                    Some(interval) => interval,
                    None => continue,
                };
            let speaker = extract_speaker_id(&interval.label);

            match turns.last_mut() {
                Some(last) if last.speaker == speaker => {
                    // Segment texts carry their own whitespace
                    last.text.push_str(&segment.text);
                    last.end = segment.end;
                }
                _ => turns.push(SpeakerTurn {
                    speaker,
                    text: segment.text.clone(),
                    start: segment.start,
                    end: segment.end,
                }),
            }
        }

        turns
    }
}

/// The interval with the most overlap against `[start, end]`; ties resolve
/// to the earlier interval.
fn best_overlap<'a>(
    intervals: &'a [SpeakerInterval],
    start: f64,
    end: f64,
) -> Option<&'a SpeakerInterval> {
    let mut best: Option<(&SpeakerInterval, f64)> = None;
    for interval in intervals {
        let overlap = (end.min(interval.end) - start.max(interval.start)).max(0.0);
        if overlap <= 0.0 {
            continue;
        }
        match best {
            Some((_, current)) if overlap <= current => {}
            _ => best = Some((interval, overlap)),
        }
    }
    best.map(|(interval, _)| interval)
}
