use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One labeled region of speech: `[start, end)` attributed to a speaker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeakerInterval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl SpeakerInterval {
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Gap between this interval and a later one. Negative when they overlap.
    pub fn gap_to(&self, later: &SpeakerInterval) -> f64 {
        later.start - self.end
    }
}

/// Speaker-labeled time intervals over a single logical stream.
///
/// The engine emits one annotation per audio chunk; the merger folds them
/// together with [`TimeAnnotation::update`] and collapses near-contiguous
/// same-speaker regions with [`TimeAnnotation::support`]. Once returned to
/// callers an annotation is treated as immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeAnnotation {
    uri: String,
    intervals: Vec<SpeakerInterval>,
}

impl TimeAnnotation {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            intervals: Vec::new(),
        }
    }

    pub fn with_intervals(uri: impl Into<String>, intervals: Vec<SpeakerInterval>) -> Self {
        Self {
            uri: uri.into(),
            intervals,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn intervals(&self) -> &[SpeakerInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Distinct speaker labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.intervals.iter().map(|i| i.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    pub fn add(&mut self, interval: SpeakerInterval) {
        self.intervals.push(interval);
    }

    /// Union another annotation's intervals into this one.
    ///
    /// Later intervals extend the covered regions; disjoint prior regions are
    /// never erased. Overlaps between same-speaker intervals are left as-is
    /// here and resolved by [`TimeAnnotation::support`].
    pub fn update(&mut self, other: &TimeAnnotation) {
        self.intervals.extend(other.intervals.iter().cloned());
    }

    /// Collapse each speaker's intervals, merging any pair whose gap is at
    /// most `collar` seconds (overlapping pairs always merge). The merged
    /// interval spans the min start to the max end of the pair.
    ///
    /// Output intervals are sorted by `(start, label)`.
    pub fn support(&self, collar: f64) -> TimeAnnotation {
        let mut by_label: BTreeMap<&str, Vec<&SpeakerInterval>> = BTreeMap::new();
        for interval in &self.intervals {
            by_label.entry(&interval.label).or_default().push(interval);
        }

        let mut merged = Vec::new();
        for (label, mut intervals) in by_label {
            intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

            let mut run: Option<SpeakerInterval> = None;
            for interval in intervals {
                match run {
                    Some(ref mut current) if current.gap_to(interval) <= collar => {
                        current.start = current.start.min(interval.start);
                        current.end = current.end.max(interval.end);
                    }
                    Some(current) => {
                        merged.push(current);
                        run = Some(SpeakerInterval::new(interval.start, interval.end, label));
                    }
                    None => {
                        run = Some(SpeakerInterval::new(interval.start, interval.end, label));
                    }
                }
            }
            if let Some(current) = run {
                merged.push(current);
            }
        }

        merged.sort_by(|a, b| {
            a.start
                .total_cmp(&b.start)
                .then_with(|| a.label.cmp(&b.label))
        });

        TimeAnnotation {
            uri: self.uri.clone(),
            intervals: merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn interval(start: f64, end: f64, label: &str) -> SpeakerInterval {
        SpeakerInterval::new(start, end, label)
    }

    #[test]
    fn test_update_appends_without_erasing() {
        let mut ann = TimeAnnotation::with_intervals("stream-1", vec![interval(0.0, 1.0, "A")]);
        let other = TimeAnnotation::with_intervals("stream-1", vec![interval(2.0, 3.0, "A")]);
        ann.update(&other);
        assert_eq!(ann.len(), 2);
        assert_relative_eq!(ann.intervals()[0].start, 0.0);
        assert_relative_eq!(ann.intervals()[1].start, 2.0);
    }

    #[test]
    fn test_support_merges_gap_within_collar() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(0.0, 2.0, "A"), interval(2.03, 4.0, "A")],
        );
        let merged = ann.support(0.05);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.intervals()[0].start, 0.0);
        assert_relative_eq!(merged.intervals()[0].end, 4.0);
    }

    #[test]
    fn test_support_keeps_gap_beyond_collar() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(0.0, 2.0, "A"), interval(2.03, 4.0, "A")],
        );
        let merged = ann.support(0.01);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_support_merges_gap_exactly_collar() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(0.0, 1.0, "A"), interval(1.05, 2.0, "A")],
        );
        let merged = ann.support(0.05);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_support_merges_overlapping_intervals() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(0.0, 1.5, "A"), interval(1.0, 2.0, "A")],
        );
        let merged = ann.support(0.0);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.intervals()[0].end, 2.0);
    }

    #[test]
    fn test_support_is_per_label() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(0.0, 1.0, "A"), interval(1.02, 2.0, "B")],
        );
        let merged = ann.support(0.05);
        // Different speakers never merge, no matter how close
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_support_handles_unsorted_input() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(2.03, 4.0, "A"), interval(0.0, 2.0, "A")],
        );
        let merged = ann.support(0.05);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.intervals()[0].start, 0.0);
        assert_relative_eq!(merged.intervals()[0].end, 4.0);
    }

    #[test]
    fn test_support_chains_multiple_merges() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![
                interval(0.0, 1.0, "A"),
                interval(1.02, 2.0, "A"),
                interval(2.04, 3.0, "A"),
            ],
        );
        let merged = ann.support(0.05);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.intervals()[0].end, 3.0);
    }

    #[test]
    fn test_support_output_sorted_chronologically() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![interval(3.0, 4.0, "B"), interval(0.0, 1.0, "A")],
        );
        let merged = ann.support(0.05);
        assert_relative_eq!(merged.intervals()[0].start, 0.0);
        assert_relative_eq!(merged.intervals()[1].start, 3.0);
    }

    #[test]
    fn test_support_preserves_uri() {
        let ann = TimeAnnotation::with_intervals("stream-42", vec![interval(0.0, 1.0, "A")]);
        assert_eq!(ann.support(0.05).uri(), "stream-42");
    }

    #[test]
    fn test_support_empty_annotation() {
        let ann = TimeAnnotation::new("s");
        let merged = ann.support(0.05);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_labels_distinct_sorted() {
        let ann = TimeAnnotation::with_intervals(
            "s",
            vec![
                interval(0.0, 1.0, "B"),
                interval(1.0, 2.0, "A"),
                interval(2.0, 3.0, "B"),
            ],
        );
        assert_eq!(ann.labels(), vec!["A", "B"]);
    }

    #[test]
    fn test_gap_to_negative_when_overlapping() {
        let a = interval(0.0, 1.5, "A");
        let b = interval(1.0, 2.0, "A");
        assert_relative_eq!(a.gap_to(&b), -0.5);
    }
}
