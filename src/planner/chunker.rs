//! Chunk segmentation

use tracing::debug;

use crate::domain::model::{Chunk, CloseReason, Word};
use crate::domain::rules::{SILENCE_GAP_SECS, TAIL_PAD_SECS};
use crate::planner::timing::TimingResolver;

/// Groups normalized words into display chunks in a single forward pass
///
/// A chunk closes when it holds `cap` words, when the silence after its last
/// word exceeds [`SILENCE_GAP_SECS`], or at the end of the transcript. A
/// chunk closed without a real pause is stitched to the next one so the
/// caption never blinks off mid-sentence.
///
/// Input is expected to come from the normalizer: every word starts no
/// earlier than the previous word ends.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    cap: usize,
}

impl Chunker {
    /// Create a chunker with the given word cap (at least 1)
    pub fn new(cap: usize) -> Self {
        Self { cap: cap.max(1) }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Segment words into chunks with fixed highlight windows
    pub fn chunk(&self, words: &[Word]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut open: Vec<Word> = Vec::with_capacity(self.cap);

        for (i, word) in words.iter().enumerate() {
            open.push(word.clone());
            let next = words.get(i + 1);

            let (reason, end) = match next {
                None => (CloseReason::EndOfTranscript, word.end + TAIL_PAD_SECS),
                Some(next) if next.start - word.end > SILENCE_GAP_SECS => {
                    (CloseReason::SilenceGap, word.end + TAIL_PAD_SECS)
                }
                Some(next) if open.len() >= self.cap => (CloseReason::WordCap, next.start),
                Some(_) => continue,
            };

            let index = chunks.len();
            chunks.push(TimingResolver::resolve_chunk(
                index,
                std::mem::take(&mut open),
                end,
                reason,
            ));
        }

        debug!(
            "Segmented {} words into {} chunks (cap {})",
            words.len(),
            chunks.len(),
            self.cap
        );
        chunks
    }
}
