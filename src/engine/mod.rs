//! Caption engine module
//!
//! The engine is the single entry point from word timings to both outputs:
//! it plans the caption track once and hands the same chunks to the frame
//! emitter and the cue emitter. It performs no I/O and never fails.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::model::{CaptionSettings, Word};
use crate::domain::rules::{ResolvedStyle, StyleResolver};
use crate::output::CueEmitter;
use crate::planner::{CaptionTrack, ChunkPlanner, FrameClock, FrameTimeline};

pub mod animation;
pub mod frames;

pub use animation::{EntranceAnimator, EntranceState};
pub use frames::{FrameEmitter, FrameProps, LayoutConstraints, WordProps};

/// Both renderings of one clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionRender {
    pub track: CaptionTrack,
    pub timeline: FrameTimeline,
    /// Cue file contents in the configured format; empty for an empty clip
    pub cues: String,
}

/// Pure caption pipeline bound to one settings value
pub struct CaptionEngine {
    settings: CaptionSettings,
    style: ResolvedStyle,
    planner: ChunkPlanner,
}

impl CaptionEngine {
    pub fn new(settings: CaptionSettings) -> Self {
        let style = StyleResolver::resolve(&settings.style, settings.caption.font_size);
        let planner = ChunkPlanner::from_settings(&settings);
        Self {
            settings,
            style,
            planner,
        }
    }

    pub fn settings(&self) -> &CaptionSettings {
        &self.settings
    }

    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.settings.fps)
    }

    /// Normalize and segment word timings
    pub fn plan(&self, words: &[Word]) -> CaptionTrack {
        self.planner.plan(words)
    }

    /// Frame-domain projection of a track
    pub fn frame_timeline(&self, track: &CaptionTrack) -> FrameTimeline {
        track.frame_timeline(self.clock(), self.style.force_uppercase)
    }

    pub fn frame_emitter(&self, track: &CaptionTrack) -> FrameEmitter {
        FrameEmitter::new(
            self.frame_timeline(track),
            self.style.clone(),
            self.settings.canvas,
        )
    }

    /// Cue file contents for a track
    pub fn cues(&self, track: &CaptionTrack) -> String {
        CueEmitter::emit(track, &self.style, &self.settings)
    }

    /// Run the whole pipeline
    pub fn render(&self, words: &[Word]) -> CaptionRender {
        let track = self.plan(words);
        let timeline = self.frame_timeline(&track);
        let cues = self.cues(&track);
        debug!(
            "Rendered {} chunks, {} frames, {} bytes of {:?} cues",
            track.len(),
            timeline.end_frame(),
            cues.len(),
            self.settings.format
        );
        CaptionRender {
            track,
            timeline,
            cues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CueFormat, WordsPerChunk};

    #[test]
    fn test_render_shares_one_segmentation() {
        let mut settings = CaptionSettings::default();
        settings.style.words_per_chunk = WordsPerChunk::One;
        let engine = CaptionEngine::new(settings);
        let words = vec![
            Word::new("a", 0.0, 0.5),
            Word::new("b", 0.5, 1.0),
            Word::new("c", 1.0, 1.5),
        ];
        let render = engine.render(&words);

        assert_eq!(render.track.len(), 3);
        assert_eq!(render.timeline.chunks.len(), 3);
        assert_eq!(render.cues.lines().filter(|l| l.starts_with("Dialogue:")).count(), 3);
    }

    #[test]
    fn test_empty_input_gives_empty_outputs() {
        let mut settings = CaptionSettings::default();
        settings.format = CueFormat::Srt;
        let render = CaptionEngine::new(settings).render(&[]);
        assert!(render.track.is_empty());
        assert!(render.timeline.is_empty());
        assert!(render.cues.is_empty());
    }
}
