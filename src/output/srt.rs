//! SubRip (SRT) cue emitter

use std::fmt::Write as _;

use crate::domain::model::{CueLayout, Rgb};
use crate::domain::rules::ResolvedStyle;
use crate::output::cues::{CueBlock, CueProjector};
use crate::planner::CaptionTrack;
use crate::utils::time::TimeFormatter;

/// Renders a caption track as numbered SRT blocks
///
/// SRT has no styles, scaling or overlays; only the caption text and its
/// timing carry over, with `<font>` tags marking the highlighted word.
pub struct SrtEmitter<'a> {
    style: &'a ResolvedStyle,
    layout: CueLayout,
}

impl<'a> SrtEmitter<'a> {
    pub fn new(style: &'a ResolvedStyle, layout: CueLayout) -> Self {
        Self { style, layout }
    }

    pub fn emit(&self, track: &CaptionTrack) -> String {
        let mut out = String::new();
        for (n, block) in CueProjector::project(track, self.layout).iter().enumerate() {
            let Some(chunk) = track.chunks.get(block.chunk_index) else {
                continue;
            };
            let words = chunk.display_words(self.style.force_uppercase);
            let _ = writeln!(out, "{}", n + 1);
            let _ = writeln!(
                out,
                "{} --> {}",
                TimeFormatter::srt(block.start),
                TimeFormatter::srt(block.end)
            );
            let _ = writeln!(out, "{}", self.text(&words, block));
            let _ = writeln!(out);
        }
        out
    }

    fn text(&self, words: &[String], block: &CueBlock) -> String {
        match block.active_word {
            None => words.join(" "),
            Some(active) => words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    let color = if i == active {
                        self.style.highlight
                    } else {
                        self.style.base
                    };
                    font_tag(word, color)
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn font_tag(word: &str, color: Rgb) -> String {
    let escaped = word.replace('<', "&lt;").replace('>', "&gt;");
    format!("<font color=\"{}\">{}</font>", color.to_hex(), escaped)
}
