//! Advanced SubStation Alpha (ASS) cue emitter

use std::fmt::Write as _;

use crate::domain::model::{CaptionSettings, Chunk, CueLayout, Rgb};
use crate::domain::rules::{
    BackgroundSpec, ResolvedStyle, StyleResolver, CAPTION_SIDE_MARGIN_PX,
    OVERLAY_SIDE_MARGIN_PX,
};
use crate::output::cues::{CueBlock, CueProjector, Overlay, OverlayRole};
use crate::planner::CaptionTrack;
use crate::utils::time::TimeFormatter;

pub const CAPTION_STYLE: &str = "Caption";
pub const TITLE_STYLE: &str = "TopTitle";
pub const PART_STYLE: &str = "PartNumber";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";
const EVENT_FORMAT: &str = "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Numpad alignments used by the styles
const ALIGN_BOTTOM_CENTER: u8 = 2;
const ALIGN_TOP_CENTER: u8 = 8;

/// Border parameters of the ASS style records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssBorder {
    pub border_style: u8,
    pub outline: f64,
    pub shadow: f64,
    pub back_colour_alpha: u8,
}

impl AssBorder {
    /// Map the resolved background onto ASS border fields
    pub fn from_style(style: &ResolvedStyle) -> Self {
        match style.background {
            BackgroundSpec::OutlineStack { shadow_px } => Self {
                border_style: 1,
                outline: style.outline.width_px,
                shadow: shadow_px,
                back_colour_alpha: 0,
            },
            BackgroundSpec::Box {
                padding_px,
                opacity,
            } => Self {
                border_style: 3,
                outline: padding_px,
                shadow: 0.0,
                back_colour_alpha: ((1.0 - opacity.clamp(0.0, 1.0)) * 255.0).round() as u8,
            },
            BackgroundSpec::SoftShadow { blur_px } => Self {
                border_style: 1,
                outline: style.outline.width_px,
                shadow: blur_px,
                back_colour_alpha: 0,
            },
            BackgroundSpec::HardShadow { offset_px } => Self {
                border_style: 1,
                outline: style.outline.width_px,
                shadow: offset_px,
                back_colour_alpha: 0,
            },
        }
    }
}

/// Renders a caption track as an ASS script
pub struct AssEmitter<'a> {
    style: &'a ResolvedStyle,
    settings: &'a CaptionSettings,
}

impl<'a> AssEmitter<'a> {
    pub fn new(style: &'a ResolvedStyle, settings: &'a CaptionSettings) -> Self {
        Self { style, settings }
    }

    /// Full script; empty when there is neither a cue nor an overlay
    pub fn emit(&self, track: &CaptionTrack) -> String {
        let overlays = Overlay::from_settings(self.settings, track);
        let blocks = CueProjector::project(track, self.settings.layout);
        if blocks.is_empty() && overlays.is_empty() {
            return String::new();
        }

        let mut out = self.header();
        for overlay in &overlays {
            let style = match overlay.role {
                OverlayRole::Title => TITLE_STYLE,
                OverlayRole::Part => PART_STYLE,
            };
            out.push_str(&Self::dialogue(0.0, overlay.end, style, &sanitize(&overlay.text)));
        }

        let scales = track.scales(self.style.force_uppercase);
        for block in &blocks {
            let Some(chunk) = track.chunks.get(block.chunk_index) else {
                continue;
            };
            let scale = scales.get(block.chunk_index).copied().unwrap_or(100);
            let text = match self.settings.layout {
                CueLayout::PerWord => self.per_word_text(chunk, block, scale),
                CueLayout::PerChunk => self.per_chunk_text(chunk, scale),
            };
            out.push_str(&Self::dialogue(block.start, block.end, CAPTION_STYLE, &text));
        }
        out
    }

    /// Script info, style records and the events format line
    pub fn header(&self) -> String {
        let canvas = self.settings.canvas;
        let mut out = String::new();
        let _ = writeln!(out, "[Script Info]");
        let _ = writeln!(out, "ScriptType: v4.00+");
        let _ = writeln!(out, "PlayResX: {}", canvas.width);
        let _ = writeln!(out, "PlayResY: {}", canvas.height);
        let _ = writeln!(out, "ScaledBorderAndShadow: yes");
        let _ = writeln!(out, "WrapStyle: 2");
        let _ = writeln!(out);
        let _ = writeln!(out, "[V4+ Styles]");
        let _ = writeln!(out, "{}", STYLE_FORMAT);
        let _ = writeln!(
            out,
            "{}",
            self.style_record(
                CAPTION_STYLE,
                self.style.font_size,
                self.style.highlight,
                self.style.base,
                ALIGN_BOTTOM_CENTER,
                CAPTION_SIDE_MARGIN_PX,
                self.settings.caption.margin_v,
            )
        );
        let _ = writeln!(
            out,
            "{}",
            self.style_record(
                TITLE_STYLE,
                StyleResolver::scaled_font_size(self.settings.title.font_size),
                Rgb::WHITE,
                Rgb::WHITE,
                ALIGN_TOP_CENTER,
                OVERLAY_SIDE_MARGIN_PX,
                self.settings.title.margin_v,
            )
        );
        let _ = writeln!(
            out,
            "{}",
            self.style_record(
                PART_STYLE,
                StyleResolver::scaled_font_size(self.settings.part.font_size),
                Rgb::WHITE,
                Rgb::WHITE,
                ALIGN_BOTTOM_CENTER,
                OVERLAY_SIDE_MARGIN_PX,
                self.settings.part.margin_v,
            )
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "[Events]");
        let _ = writeln!(out, "{}", EVENT_FORMAT);
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn style_record(
        &self,
        name: &str,
        font_size: u32,
        primary: Rgb,
        secondary: Rgb,
        alignment: u8,
        margin_lr: u32,
        margin_v: u32,
    ) -> String {
        let border = AssBorder::from_style(self.style);
        format!(
            "Style: {},{},{},{},{},{},{},-1,0,0,0,100,100,0,0,{},{},{},{},{},{},{},1",
            name,
            self.style.font_family,
            font_size,
            primary.to_ass_style(0),
            secondary.to_ass_style(0),
            Rgb::BLACK.to_ass_style(0),
            Rgb::BLACK.to_ass_style(border.back_colour_alpha),
            border.border_style,
            border.outline,
            border.shadow,
            alignment,
            margin_lr,
            margin_lr,
            margin_v,
        )
    }

    fn dialogue(start: f64, end: f64, style: &str, text: &str) -> String {
        format!(
            "Dialogue: 0,{},{},{},,0,0,0,,{}\n",
            TimeFormatter::ass(start),
            TimeFormatter::ass(end),
            style,
            text
        )
    }

    /// Whole chunk with the block's word in the highlight color
    fn per_word_text(&self, chunk: &Chunk, block: &CueBlock, scale: u32) -> String {
        let highlight = self.style.highlight.to_ass_override();
        let base = self.style.base.to_ass_override();
        let words: Vec<String> = chunk
            .display_words(self.style.force_uppercase)
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let color = if block.active_word == Some(i) {
                    &highlight
                } else {
                    &base
                };
                format!("{{\\c{}}}{}", color, sanitize(word))
            })
            .collect();
        format!("{}{}", scale_tag(scale), words.join(" "))
    }

    /// Whole chunk once, each word switching color through timed transforms
    fn per_chunk_text(&self, chunk: &Chunk, scale: u32) -> String {
        let highlight = self.style.highlight.to_ass_override();
        let base = self.style.base.to_ass_override();
        // Offsets are relative to the line start as it is printed
        let line_start_ms = TimeFormatter::quantise(chunk.start, 100.0) * 10;

        let words: Vec<String> = chunk
            .display_words(self.style.force_uppercase)
            .iter()
            .zip(&chunk.windows)
            .map(|(word, window)| {
                let on = TimeFormatter::quantise(window.start, 1000.0).saturating_sub(line_start_ms);
                let off = TimeFormatter::quantise(window.end, 1000.0).saturating_sub(line_start_ms);
                format!(
                    "{{\\c{base}\\t({on},{on1},\\c{hl})\\t({off},{off1},\\c{base})}}{word}",
                    base = base,
                    hl = highlight,
                    on = on,
                    on1 = on + 1,
                    off = off,
                    off1 = off + 1,
                    word = sanitize(word),
                )
            })
            .collect();
        format!("{}{}", scale_tag(scale), words.join(" "))
    }
}

fn scale_tag(scale: u32) -> String {
    format!("{{\\fscx{0}\\fscy{0}}}", scale)
}

/// Strip characters that would open override blocks or break the event line
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\' | '\n' | '\r'))
        .collect()
}
