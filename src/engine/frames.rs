//! Frame-indexed props for an animated overlay renderer

use serde::{Deserialize, Serialize};

use crate::domain::model::Canvas;
use crate::domain::rules::{
    BackgroundSpec, OutlineSpec, ResolvedStyle, CAPTION_SIDE_MARGIN_PX, GLYPH_WIDTH_EM,
};
use crate::engine::animation::{EntranceAnimator, EntranceState};
use crate::planner::{FrameChunk, FrameTimeline};

/// Single-line layout rules handed to the renderer
///
/// The renderer must not wrap; when the line is wider than `max_width_px`
/// it shrinks the font until it fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstraints {
    pub max_width_px: f64,
    pub font_size_px: f64,
    pub no_wrap: bool,
    pub shrink_to_fit: bool,
}

impl LayoutConstraints {
    pub fn for_canvas(canvas: Canvas, font_size_px: u32) -> Self {
        let margins = 2 * CAPTION_SIDE_MARGIN_PX;
        Self {
            max_width_px: canvas.width.saturating_sub(margins).max(1) as f64,
            font_size_px: font_size_px as f64,
            no_wrap: true,
            shrink_to_fit: true,
        }
    }

    /// Approximate rendered width of a line of text
    pub fn estimated_width(text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * GLYPH_WIDTH_EM * font_size_px
    }

    /// Largest font size, up to the configured one, at which `text` fits
    pub fn fitted_font_size(&self, text: &str) -> f64 {
        let width = Self::estimated_width(text, self.font_size_px);
        if !self.shrink_to_fit || width <= self.max_width_px {
            self.font_size_px
        } else {
            self.font_size_px * self.max_width_px / width
        }
    }

    pub fn fits(&self, text: &str, font_size_px: f64) -> bool {
        Self::estimated_width(text, font_size_px) <= self.max_width_px + 1e-6
    }
}

/// One word as it should be drawn at a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordProps {
    pub text: String,
    pub active: bool,
    pub color: String,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameProps {
    pub frame: u64,
    pub chunk_index: usize,
    pub start_frame: u64,
    pub end_frame: u64,
    /// Auto-fit percentage shared with the cue file
    pub fit_scale: u32,
    pub entrance: EntranceState,
    pub font_family: String,
    pub font_size_px: f64,
    pub layout: LayoutConstraints,
    /// Same treatment the cue file declares in its style records
    pub outline: OutlineSpec,
    pub background: BackgroundSpec,
    pub words: Vec<WordProps>,
}

impl FrameProps {
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn active_word(&self) -> Option<usize> {
        self.words.iter().position(|w| w.active)
    }
}

/// Answers "what is on screen at frame f" over a frame timeline
pub struct FrameEmitter {
    timeline: FrameTimeline,
    style: ResolvedStyle,
    layout: LayoutConstraints,
}

impl FrameEmitter {
    pub fn new(timeline: FrameTimeline, style: ResolvedStyle, canvas: Canvas) -> Self {
        let layout = LayoutConstraints::for_canvas(canvas, style.font_size);
        Self {
            timeline,
            style,
            layout,
        }
    }

    pub fn timeline(&self) -> &FrameTimeline {
        &self.timeline
    }

    /// Props at `frame`, or `None` when no chunk is visible
    pub fn props_at(&self, frame: u64) -> Option<FrameProps> {
        let chunk = self.timeline.chunk_at(frame)?;
        Some(self.chunk_props(chunk, frame))
    }

    fn chunk_props(&self, chunk: &FrameChunk, frame: u64) -> FrameProps {
        let elapsed = (frame - chunk.start_frame) as f64 / self.timeline.fps.max(1) as f64;
        let entrance = EntranceAnimator::evaluate(&self.style.entrance, elapsed);

        let highlight = self.style.highlight.to_hex();
        let base = self.style.base.to_hex();
        let words: Vec<WordProps> = chunk
            .words
            .iter()
            .map(|w| {
                let active = w.is_active(frame);
                WordProps {
                    text: w.text.clone(),
                    active,
                    color: if active { highlight.clone() } else { base.clone() },
                }
            })
            .collect();

        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        FrameProps {
            frame,
            chunk_index: chunk.index,
            start_frame: chunk.start_frame,
            end_frame: chunk.end_frame,
            fit_scale: chunk.scale,
            entrance,
            font_family: self.style.font_family.clone(),
            font_size_px: self.layout.fitted_font_size(&text),
            layout: self.layout,
            outline: self.style.outline,
            background: self.style.background,
            words,
        }
    }
}
