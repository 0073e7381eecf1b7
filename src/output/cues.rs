//! Cue boundary projection shared by every cue format
//!
//! Cue boundaries are read straight off the chunks' highlight windows and
//! visible intervals; no format computes its own segmentation.

use serde::{Deserialize, Serialize};

use crate::domain::model::{CaptionSettings, CueLayout, TextRole};
use crate::planner::CaptionTrack;

/// One timed cue in clip seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueBlock {
    pub start: f64,
    pub end: f64,
    pub chunk_index: usize,
    /// Highlighted word for per-word cues; `None` for whole-chunk cues
    pub active_word: Option<usize>,
}

/// Projects a caption track onto cue blocks
pub struct CueProjector;

impl CueProjector {
    pub fn project(track: &CaptionTrack, layout: CueLayout) -> Vec<CueBlock> {
        match layout {
            CueLayout::PerWord => track
                .chunks
                .iter()
                .flat_map(|chunk| {
                    chunk.windows.iter().enumerate().map(move |(i, window)| CueBlock {
                        start: window.start,
                        end: window.end,
                        chunk_index: chunk.index,
                        active_word: Some(i),
                    })
                })
                .collect(),
            CueLayout::PerChunk => track
                .chunks
                .iter()
                .map(|chunk| CueBlock {
                    start: chunk.start,
                    end: chunk.end,
                    chunk_index: chunk.index,
                    active_word: None,
                })
                .collect(),
        }
    }
}

/// Which overlay a fixed text event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRole {
    Title,
    Part,
}

/// Fixed text shown for the whole clip
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub role: OverlayRole,
    pub text: String,
    pub end: f64,
}

impl Overlay {
    /// Title and part overlays configured in `settings`, spanning the clip
    ///
    /// The clip length defaults to the end of the last chunk. Titles are
    /// uppercased; blank texts produce no overlay.
    pub fn from_settings(settings: &CaptionSettings, track: &CaptionTrack) -> Vec<Overlay> {
        let end = settings
            .clip_duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| track.end());
        if end <= 0.0 {
            return Vec::new();
        }

        let text_of = |role: &TextRole| {
            role.text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        };

        let mut overlays = Vec::new();
        if let Some(title) = text_of(&settings.title) {
            overlays.push(Overlay {
                role: OverlayRole::Title,
                text: title.to_uppercase(),
                end,
            });
        }
        if let Some(part) = text_of(&settings.part) {
            overlays.push(Overlay {
                role: OverlayRole::Part,
                text: part,
                end,
            });
        }
        overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Word;
    use crate::planner::ChunkPlanner;

    fn track() -> CaptionTrack {
        ChunkPlanner::new(3).plan(&[
            Word::new("a", 0.0, 0.3),
            Word::new("b", 0.3, 0.6),
            Word::new("c", 0.6, 0.9),
            Word::new("d", 0.9, 1.2),
        ])
    }

    #[test]
    fn test_per_word_blocks_follow_windows() {
        let track = track();
        let blocks = CueProjector::project(&track, CueLayout::PerWord);
        assert_eq!(blocks.len(), 4);
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(blocks[3].chunk_index, 1);
        assert_eq!(blocks[3].active_word, Some(0));
    }

    #[test]
    fn test_per_chunk_blocks_follow_chunks() {
        let track = track();
        let blocks = CueProjector::project(&track, CueLayout::PerChunk);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].end, 0.9);
        assert_eq!(blocks[1].start, 0.9);
        assert!(blocks.iter().all(|b| b.active_word.is_none() && b.end > b.start));
    }

    #[test]
    fn test_overlays_span_clip() {
        let mut settings = CaptionSettings::default();
        settings.title.text = Some("my story".to_string());
        settings.part.text = Some("Part 2".to_string());

        let overlays = Overlay::from_settings(&settings, &track());
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].text, "MY STORY");
        assert_eq!(overlays[1].role, OverlayRole::Part);
        assert!((overlays[0].end - 1.35).abs() < 1e-9);

        settings.clip_duration = Some(60.0);
        assert_eq!(Overlay::from_settings(&settings, &track())[0].end, 60.0);
    }

    #[test]
    fn test_blank_overlays_are_skipped() {
        let mut settings = CaptionSettings::default();
        settings.title.text = Some("   ".to_string());
        assert!(Overlay::from_settings(&settings, &track()).is_empty());
        assert!(Overlay::from_settings(&CaptionSettings::default(), &CaptionTrack::default()).is_empty());
    }
}
