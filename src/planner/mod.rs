//! Chunk planning and timing resolution module

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::model::{CaptionSettings, Chunk, Word};
use crate::domain::rules::AutoFitSizer;
use crate::transcript::TranscriptNormalizer;

pub mod chunker;
pub mod timing;

pub use chunker::Chunker;
pub use timing::{FrameChunk, FrameClock, FrameTimeline, FrameWord, TimingResolver};

/// Time-ordered, non-overlapping chunk list of one clip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    pub chunks: Vec<Chunk>,
}

impl CaptionTrack {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// End of the last chunk, or 0 for an empty track
    pub fn end(&self) -> f64 {
        self.chunks.last().map(|c| c.end).unwrap_or(0.0)
    }

    pub fn word_count(&self) -> usize {
        self.chunks.iter().map(|c| c.word_count()).sum()
    }

    /// Chunk visible at time `t`
    pub fn chunk_at(&self, t: f64) -> Option<&Chunk> {
        let idx = self.chunks.partition_point(|c| c.end <= t);
        self.chunks.get(idx).filter(|c| c.is_visible_at(t))
    }

    /// Auto-fit scale of every chunk, in chunk order
    pub fn scales(&self, force_uppercase: bool) -> Vec<u32> {
        self.chunks
            .iter()
            .map(|c| AutoFitSizer::scale_for_chunk(c, force_uppercase))
            .collect()
    }

    /// Project the track into the frame domain
    pub fn frame_timeline(&self, clock: FrameClock, force_uppercase: bool) -> FrameTimeline {
        FrameTimeline::project(&self.chunks, clock, &self.scales(force_uppercase), force_uppercase)
    }
}

/// Turns raw word timings into a caption track
pub struct ChunkPlanner {
    chunker: Chunker,
}

impl ChunkPlanner {
    pub fn new(cap: usize) -> Self {
        Self {
            chunker: Chunker::new(cap),
        }
    }

    pub fn from_settings(settings: &CaptionSettings) -> Self {
        Self::new(settings.word_cap())
    }

    /// Normalize then segment
    pub fn plan(&self, words: &[Word]) -> CaptionTrack {
        let normalized = TranscriptNormalizer::normalize(words);
        let track = CaptionTrack::new(self.chunker.chunk(&normalized));
        info!(
            "Planned {} chunks from {} words, track ends at {:.3}s",
            track.len(),
            words.len(),
            track.end()
        );
        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_lookup_in_continuous_domain() {
        let words = vec![
            Word::new("one", 0.0, 0.4),
            Word::new("two", 0.4, 0.8),
            Word::new("three", 2.0, 2.3),
        ];
        let track = ChunkPlanner::new(3).plan(&words);

        assert_eq!(track.len(), 2);
        assert_eq!(track.chunk_at(0.0).unwrap().index, 0);
        assert_eq!(track.chunk_at(0.9).unwrap().index, 0);
        assert!(track.chunk_at(0.96).is_none());
        assert_eq!(track.chunk_at(2.1).unwrap().index, 1);
        assert!(track.chunk_at(2.5).is_none());
        assert_eq!(track.word_count(), 3);
    }

    #[test]
    fn test_planner_normalizes_before_chunking() {
        let words = vec![Word::new("stretched", 0.0, 2.0), Word::new("next", 2.0, 2.2)];
        let track = ChunkPlanner::new(3).plan(&words);
        assert!((track.chunks[0].start - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_track() {
        let track = ChunkPlanner::new(1).plan(&[]);
        assert!(track.is_empty());
        assert_eq!(track.end(), 0.0);
        assert!(track.chunk_at(0.0).is_none());
    }
}
