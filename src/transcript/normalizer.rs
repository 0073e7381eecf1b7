//! Word timing repair

use tracing::debug;

use crate::domain::model::Word;
use crate::domain::rules::{LONG_WORD_RESET_SECS, LONG_WORD_SECS, MIN_DURATION_SECS};

/// Repairs pathological word timings
///
/// The output has the same length and order as the input. Every word ends
/// strictly after it starts, and every word starts no earlier than the
/// previous word ends.
pub struct TranscriptNormalizer;

impl TranscriptNormalizer {
    pub fn normalize(words: &[Word]) -> Vec<Word> {
        let mut normalized = Vec::with_capacity(words.len());
        let mut previous_end = 0.0_f64;
        let mut repaired = 0usize;

        for word in words {
            let (start, end, changed) = Self::repair(word.start, word.end, previous_end);
            if changed {
                repaired += 1;
            }
            previous_end = end;
            normalized.push(Word::new(word.text.clone(), start, end));
        }

        if repaired > 0 {
            debug!("Repaired timings of {} of {} words", repaired, words.len());
        }
        normalized
    }

    fn repair(raw_start: f64, raw_end: f64, previous_end: f64) -> (f64, f64, bool) {
        let mut start = Self::floor_to_zero(raw_start);
        let mut end = Self::floor_to_zero(raw_end);

        // A single word spanning more than LONG_WORD_SECS is a transcriber
        // silence-merge artifact, not slow speech.
        if end - start > LONG_WORD_SECS {
            start = (end - LONG_WORD_RESET_SECS).max(0.0);
        }

        if start < previous_end {
            start = previous_end;
        }

        if end - start < MIN_DURATION_SECS {
            end = start + MIN_DURATION_SECS;
        }

        let changed = start != raw_start || end != raw_end;
        (start, end, changed)
    }

    fn floor_to_zero(seconds: f64) -> f64 {
        if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> Word {
        Word::new(text, start, end)
    }

    #[test]
    fn test_long_word_start_is_reset() {
        let out = TranscriptNormalizer::normalize(&[word("so", 2.0, 3.0)]);
        assert_eq!(out[0].start, 2.6);
        assert_eq!(out[0].end, 3.0);
    }

    #[test]
    fn test_long_word_near_zero_is_floored() {
        let out = TranscriptNormalizer::normalize(&[word("um", 0.0, 0.9)]);
        assert!((out[0].start - 0.5).abs() < 1e-9);

        let out = TranscriptNormalizer::normalize(&[word("um", -3.0, 0.3)]);
        assert_eq!(out[0].start, 0.0);
        assert_eq!(out[0].end, 0.3);
    }

    #[test]
    fn test_exactly_long_threshold_is_kept() {
        let out = TranscriptNormalizer::normalize(&[word("slow", 1.0, 1.8)]);
        assert_eq!(out[0].start, 1.0);
    }

    #[test]
    fn test_zero_length_gets_min_duration() {
        let out = TranscriptNormalizer::normalize(&[word("a", 1.0, 1.0), word("b", 1.0, 1.0)]);
        assert_eq!(out[0].start, 1.0);
        assert!((out[0].end - 1.05).abs() < 1e-9);
        assert_eq!(out[1].start, out[0].end);
        assert!(out[1].end > out[1].start);
    }

    #[test]
    fn test_inverted_range_is_repaired() {
        let out = TranscriptNormalizer::normalize(&[word("x", 5.0, 4.0)]);
        assert_eq!(out[0].start, 5.0);
        assert!((out[0].end - 5.05).abs() < 1e-9);
    }

    #[test]
    fn test_non_monotonic_starts_are_clamped() {
        let out = TranscriptNormalizer::normalize(&[
            word("one", 1.0, 1.5),
            word("two", 0.8, 1.9),
            word("three", 2.0, 2.2),
        ]);
        assert_eq!(out[1].start, 1.5);
        assert_eq!(out[1].end, 1.9);
        for pair in out.windows(2) {
            assert!(pair[1].start >= pair[0].end);
        }
    }

    #[test]
    fn test_non_finite_times_become_zero() {
        let out = TranscriptNormalizer::normalize(&[word("nan", f64::NAN, f64::INFINITY)]);
        assert_eq!(out[0].start, 0.0);
        assert!((out[0].end - MIN_DURATION_SECS).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_length_order_and_text() {
        let input = vec![word(" a ", 0.0, 0.1), word("", 0.1, 0.1), word("c", 0.05, 0.3)];
        let out = TranscriptNormalizer::normalize(&input);
        let texts: Vec<&str> = out.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec![" a ", "", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(TranscriptNormalizer::normalize(&[]).is_empty());
    }
}
