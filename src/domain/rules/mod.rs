// Domain rules - Segmentation constants, auto-fit and style policies

use serde::{Deserialize, Serialize};

use crate::domain::model::*;

/// Silence longer than this closes a chunk
pub const SILENCE_GAP_SECS: f64 = 0.4;
/// Visible time appended after the last word of an unstitched chunk
pub const TAIL_PAD_SECS: f64 = 0.15;
/// A single word longer than this is treated as a merged-silence artifact
pub const LONG_WORD_SECS: f64 = 0.8;
/// Repaired duration of a long-word artifact, measured back from its end
pub const LONG_WORD_RESET_SECS: f64 = 0.4;
/// Minimum duration of any word or highlight window
pub const MIN_DURATION_SECS: f64 = 0.05;
/// Default cap for `words_per_chunk = "full"`
pub const DEFAULT_FULL_WORDS: usize = 7;
/// Characters that fit on one caption line at 100% scale
pub const AUTO_FIT_MAX_CHARS: usize = 20;
/// Caption font sizes are configured in points and rendered at this multiple
pub const FONT_SIZE_MULTIPLIER: f64 = 1.2;
/// Horizontal margin on each side of the caption line, in canvas pixels
pub const CAPTION_SIDE_MARGIN_PX: u32 = 15;
/// Horizontal margin on each side of the title and part overlays
pub const OVERLAY_SIDE_MARGIN_PX: u32 = 40;
/// Average advance of a bold display glyph, as a fraction of the font size
pub const GLYPH_WIDTH_EM: f64 = 0.6;

/// Business rules for keeping a chunk on a single line
pub struct AutoFitSizer;

impl AutoFitSizer {
    /// Visible characters of a chunk including one space between words
    pub fn total_chars<S: AsRef<str>>(words: &[S]) -> usize {
        if words.is_empty() {
            return 0;
        }
        let letters: usize = words
            .iter()
            .map(|w| w.as_ref().trim().chars().count())
            .sum();
        letters + (words.len() - 1)
    }

    /// Integer percentage scale for a character count
    ///
    /// 100 up to [`AUTO_FIT_MAX_CHARS`], `floor(20 / total * 100)` beyond it.
    pub fn scale_for_chars(total_chars: usize) -> u32 {
        if total_chars <= AUTO_FIT_MAX_CHARS {
            return 100;
        }
        let scale = (AUTO_FIT_MAX_CHARS * 100) / total_chars;
        scale.max(1) as u32
    }

    /// Scale for a chunk as it will be displayed
    pub fn scale_for_chunk(chunk: &Chunk, force_uppercase: bool) -> u32 {
        let words = chunk.display_words(force_uppercase);
        Self::scale_for_chars(Self::total_chars(&words))
    }
}

/// Outline drawn around glyphs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineSpec {
    pub width_px: f64,
}

/// The single background treatment of a render
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BackgroundSpec {
    /// Thick outline with a drop shadow stacked under it
    OutlineStack { shadow_px: f64 },
    /// Filled translucent box behind the line
    Box { padding_px: f64, opacity: f64 },
    /// Blurred shadow only, no outline
    SoftShadow { blur_px: f64 },
    /// Hard offset shadow giving a 3D look
    HardShadow { offset_px: f64 },
}

/// Easing family of an entrance animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Easing {
    /// Damped spring, settles towards 1 with optional overshoot
    Spring { stiffness: f64, damping: f64, mass: f64 },
    /// Linear ramp over `duration` seconds
    Linear { duration: f64 },
    /// Cubic ease-out over `duration` seconds
    EaseOut { duration: f64 },
}

/// Parameters of a chunk's entrance animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntranceCurve {
    pub easing: Easing,
    pub from_scale: f64,
    pub from_opacity: f64,
    pub from_offset_y: f64,
}

/// Concrete visual parameters shared by both emitters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_size: u32,
    pub force_uppercase: bool,
    #[serde(with = "rgb_hex")]
    pub highlight: Rgb,
    #[serde(with = "rgb_hex")]
    pub base: Rgb,
    pub outline: OutlineSpec,
    pub background: BackgroundSpec,
    pub entrance: EntranceCurve,
}

impl ResolvedStyle {
    pub fn highlight_hex(&self) -> String {
        self.highlight.to_hex()
    }
}

/// Business rules mapping a style configuration to visual parameters
pub struct StyleResolver;

impl StyleResolver {
    /// Resolve the caption style for a render
    pub fn resolve(style: &StyleConfig, caption_font_size: u32) -> ResolvedStyle {
        let (outline, background) = Self::background(style.background_style);
        ResolvedStyle {
            font_family: Self::font_family(&style.font),
            font_size: Self::scaled_font_size(caption_font_size),
            force_uppercase: style.force_uppercase,
            highlight: style.highlight_color.rgb(),
            base: Rgb::WHITE,
            outline,
            background,
            entrance: Self::entrance(style.animation),
        }
    }

    /// Rendered pixel size for a configured font size
    pub fn scaled_font_size(font_size: u32) -> u32 {
        (font_size as f64 * FONT_SIZE_MULTIPLIER).round() as u32
    }

    fn font_family(font: &str) -> String {
        let font = font.trim();
        if font.is_empty() {
            StyleConfig::default().font
        } else {
            font.to_string()
        }
    }

    /// Exactly one treatment per background style, never combined
    pub fn background(style: BackgroundStyle) -> (OutlineSpec, BackgroundSpec) {
        match style {
            BackgroundStyle::Outline => (
                OutlineSpec { width_px: 5.0 },
                BackgroundSpec::OutlineStack { shadow_px: 3.0 },
            ),
            BackgroundStyle::Box => (
                OutlineSpec { width_px: 0.0 },
                BackgroundSpec::Box {
                    padding_px: 12.0,
                    opacity: 0.4,
                },
            ),
            BackgroundStyle::Shadow => (
                OutlineSpec { width_px: 0.0 },
                BackgroundSpec::SoftShadow { blur_px: 8.0 },
            ),
            BackgroundStyle::ThreeD => (
                OutlineSpec { width_px: 2.0 },
                BackgroundSpec::HardShadow { offset_px: 6.0 },
            ),
        }
    }

    /// Entrance curve parameters per animation style
    pub fn entrance(animation: AnimationStyle) -> EntranceCurve {
        match animation {
            AnimationStyle::Pop => EntranceCurve {
                easing: Easing::Spring {
                    stiffness: 200.0,
                    damping: 12.0,
                    mass: 0.5,
                },
                from_scale: 0.6,
                from_opacity: 1.0,
                from_offset_y: 0.0,
            },
            AnimationStyle::Bounce => EntranceCurve {
                easing: Easing::Spring {
                    stiffness: 120.0,
                    damping: 6.0,
                    mass: 0.8,
                },
                from_scale: 0.8,
                from_opacity: 1.0,
                from_offset_y: 40.0,
            },
            AnimationStyle::Slide => EntranceCurve {
                easing: Easing::EaseOut { duration: 0.25 },
                from_scale: 1.0,
                from_opacity: 0.0,
                from_offset_y: 80.0,
            },
            AnimationStyle::Fade => EntranceCurve {
                easing: Easing::Linear { duration: 0.2 },
                from_scale: 1.0,
                from_opacity: 0.0,
                from_offset_y: 0.0,
            },
        }
    }
}

mod rgb_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::model::Rgb;

    pub fn serialize<S: Serializer>(rgb: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&rgb.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let hex = String::deserialize(deserializer)?;
        let digits = hex.trim_start_matches('#');
        let parse = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {}", hex)))
        };
        if digits.len() != 6 {
            return Err(serde::de::Error::custom(format!("invalid color: {}", hex)));
        }
        Ok(Rgb::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

#[cfg(test)]
mod tests;
