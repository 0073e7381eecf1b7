//! Clip-window selection over a source transcript

use crate::domain::model::{ClipWindow, Word};

/// Restricts a transcript to the part of the timeline a clip covers and
/// rebases its times so the clip starts at zero
pub struct TranscriptWindow;

impl TranscriptWindow {
    /// Words lying entirely inside `window`, shifted to clip time
    pub fn select(words: &[Word], window: &ClipWindow) -> Vec<Word> {
        let offset = window.start.seconds;
        words
            .iter()
            .filter(|w| window.contains_span(w.start, w.end))
            .map(|w| Self::shift(w, offset))
            .collect()
    }

    /// Words whose start falls in `[window.start, window.end)`, shifted to clip time
    ///
    /// Used for split-mode parts so a word straddling a part boundary is kept
    /// by the part it starts in instead of being dropped by both.
    pub fn select_by_start(words: &[Word], window: &ClipWindow) -> Vec<Word> {
        let offset = window.start.seconds;
        words
            .iter()
            .filter(|w| w.start >= window.start.seconds && w.start < window.end.seconds)
            .map(|w| Self::shift(w, offset))
            .collect()
    }

    fn shift(word: &Word, offset: f64) -> Word {
        Word::new(word.text.clone(), word.start - offset, word.end - offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeSpec;

    fn window(start: f64, end: f64) -> ClipWindow {
        ClipWindow::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end)).unwrap()
    }

    fn words() -> Vec<Word> {
        vec![
            Word::new("before", 9.0, 9.8),
            Word::new("inside", 10.0, 10.5),
            Word::new("edge", 19.8, 20.3),
            Word::new("after", 21.0, 21.2),
        ]
    }

    #[test]
    fn test_select_keeps_contained_words_and_rebases() {
        let selected = TranscriptWindow::select(&words(), &window(10.0, 20.0));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].text, "inside");
        assert_eq!(selected[0].start, 0.0);
        assert_eq!(selected[0].end, 0.5);
    }

    #[test]
    fn test_select_by_start_keeps_straddling_word() {
        let selected = TranscriptWindow::select_by_start(&words(), &window(10.0, 20.0));
        let texts: Vec<&str> = selected.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["inside", "edge"]);

        let next = TranscriptWindow::select_by_start(&words(), &window(20.0, 30.0));
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].text, "after");
    }
}
