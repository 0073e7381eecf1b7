//! Timing resolution in the continuous (seconds) and discrete (frame) domains
//!
//! Highlight windows are derived once, when a chunk is closed. The frame
//! domain is a projection of those windows through [`FrameClock::to_frame`],
//! the only place seconds are turned into frame numbers.

use serde::{Deserialize, Serialize};

use crate::domain::model::{ActiveWindow, Chunk, CloseReason, Word};
use crate::domain::rules::{MIN_DURATION_SECS, TAIL_PAD_SECS};

/// Derives per-word highlight windows for a chunk
pub struct TimingResolver;

impl TimingResolver {
    /// Build a chunk from its words, fixing the highlight window of every word
    ///
    /// Interior words are highlighted until the next word starts. The last
    /// word keeps the highlight for the tail pad, but never past the chunk
    /// end, so a stitched chunk hands over to its successor exactly.
    pub fn resolve_chunk(index: usize, words: Vec<Word>, end: f64, close_reason: CloseReason) -> Chunk {
        let start = words.first().map(|w| w.start).unwrap_or(0.0);
        let windows = Self::active_windows(&words, end);
        Chunk {
            index,
            words,
            windows,
            start,
            end,
            close_reason,
        }
    }

    pub fn active_windows(words: &[Word], chunk_end: f64) -> Vec<ActiveWindow> {
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let natural_end = match words.get(i + 1) {
                    Some(next) => next.start,
                    None => (word.end + TAIL_PAD_SECS).min(chunk_end),
                };
                let end = if natural_end - word.start < MIN_DURATION_SECS {
                    word.start + MIN_DURATION_SECS
                } else {
                    natural_end
                };
                ActiveWindow {
                    start: word.start,
                    end,
                }
            })
            .collect()
    }
}

/// Fixed frame rate clock for the discrete domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameClock {
    pub fps: u32,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    /// Canonical seconds-to-frame conversion: `round(seconds * fps)`
    pub fn to_frame(&self, seconds: f64) -> u64 {
        let frame = (seconds * self.fps as f64).round();
        if frame.is_finite() && frame > 0.0 {
            frame as u64
        } else {
            0
        }
    }

    /// Wall-clock time at which a frame is shown
    pub fn to_seconds(&self, frame: u64) -> f64 {
        frame as f64 / self.fps as f64
    }

    pub fn frame_duration(&self) -> f64 {
        1.0 / self.fps as f64
    }
}

/// A word's highlight interval in frames, `[start_frame, end_frame)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameWord {
    pub text: String,
    pub start_frame: u64,
    pub end_frame: u64,
}

impl FrameWord {
    pub fn is_active(&self, frame: u64) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }
}

/// A chunk's visible interval in frames, `[start_frame, end_frame)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameChunk {
    pub index: usize,
    pub start_frame: u64,
    pub end_frame: u64,
    pub scale: u32,
    pub words: Vec<FrameWord>,
}

impl FrameChunk {
    pub fn is_visible(&self, frame: u64) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }

    pub fn active_word(&self, frame: u64) -> Option<usize> {
        self.words.iter().position(|w| w.is_active(frame))
    }
}

/// Time-ordered chunk list in the frame domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTimeline {
    pub fps: u32,
    pub chunks: Vec<FrameChunk>,
}

impl FrameTimeline {
    /// Project chunks onto the frame clock; `scales[i]` is chunk `i`'s auto-fit scale
    pub fn project(chunks: &[Chunk], clock: FrameClock, scales: &[u32], force_uppercase: bool) -> Self {
        let chunks = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| FrameChunk {
                index: chunk.index,
                start_frame: clock.to_frame(chunk.start),
                end_frame: clock.to_frame(chunk.end),
                scale: scales.get(i).copied().unwrap_or(100),
                words: chunk
                    .display_words(force_uppercase)
                    .into_iter()
                    .zip(&chunk.windows)
                    .map(|(text, window)| FrameWord {
                        text,
                        start_frame: clock.to_frame(window.start),
                        end_frame: clock.to_frame(window.end),
                    })
                    .collect(),
            })
            .collect();
        Self {
            fps: clock.fps,
            chunks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk visible at `frame`, by binary search over the ordered chunk list
    pub fn chunk_at(&self, frame: u64) -> Option<&FrameChunk> {
        let idx = self.chunks.partition_point(|c| c.end_frame <= frame);
        self.chunks.get(idx).filter(|c| c.is_visible(frame))
    }

    /// One past the last visible frame
    pub fn end_frame(&self) -> u64 {
        self.chunks.last().map(|c| c.end_frame).unwrap_or(0)
    }
}
