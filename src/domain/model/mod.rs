// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::errors::DomainError;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from hours, minutes, seconds, milliseconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let total_seconds = hours as f64 * 3600.0
            + minutes as f64 * 60.0
            + seconds as f64
            + milliseconds as f64 / 1000.0;
        Self {
            seconds: total_seconds,
        }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(
                    "Time must be a finite, non-negative number".to_string(),
                ));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = minutes
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid minutes format".to_string()))?;
                let seconds = Self::parse_seconds_part(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = hours
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid hours format".to_string()))?;
                let minutes = minutes
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid minutes format".to_string()))?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                let seconds = Self::parse_seconds_part(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(
                "Invalid time format. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)".to_string(),
            )),
        }
    }

    fn parse_seconds_part(part: &str) -> Result<f64, DomainError> {
        let seconds = part
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs("Invalid seconds format".to_string()))?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DomainError::BadArgs(
                "Seconds must be less than 60".to_string(),
            ));
        }
        Ok(seconds)
    }

    /// Format as HH:MM:SS.ms (hours omitted when zero)
    pub fn format_hms(&self) -> String {
        let total_ms = (self.seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// A slice of the source timeline that one rendered clip covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub start: TimeSpec,
    pub end: TimeSpec,
}

impl ClipWindow {
    /// Create a new clip window with validation
    pub fn new(start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        if start.seconds >= end.seconds {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) must be before end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end.seconds - self.start.seconds
    }

    /// Whether a word lies entirely inside the window
    pub fn contains_span(&self, start: f64, end: f64) -> bool {
        start >= self.start.seconds && end <= self.end.seconds
    }
}

/// One transcribed word with its timing in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Half-open interval `[start, end)` during which a word is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveWindow {
    pub start: f64,
    pub end: f64,
}

impl ActiveWindow {
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Why the chunker closed a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloseReason {
    /// The words-per-chunk cap was reached; the chunk is stitched to the next one
    WordCap,
    /// A silence longer than the gap threshold follows
    SilenceGap,
    /// The last word of the transcript
    EndOfTranscript,
}

impl CloseReason {
    /// Whether the chunk end was extended to the next chunk's start
    pub fn is_stitched(&self) -> bool {
        matches!(self, CloseReason::WordCap)
    }
}

/// A group of consecutive words displayed together as one caption unit
///
/// `windows[i]` is the highlight window of `words[i]`; both are fixed when
/// the chunk is closed and never recomputed by the emitters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub words: Vec<Word>,
    pub windows: Vec<ActiveWindow>,
    pub start: f64,
    pub end: f64,
    pub close_reason: CloseReason,
}

impl Chunk {
    /// Continuous-domain visibility test
    pub fn is_visible_at(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Index of the highlighted word at time `t`, if any
    pub fn active_word_at(&self, t: f64) -> Option<usize> {
        self.windows.iter().position(|w| w.contains(t))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Chunk text as displayed, words trimmed and joined with single spaces
    pub fn display_text(&self, force_uppercase: bool) -> String {
        self.display_words(force_uppercase).join(" ")
    }

    /// Individual display words
    pub fn display_words(&self, force_uppercase: bool) -> Vec<String> {
        self.words
            .iter()
            .map(|w| display_word(&w.text, force_uppercase))
            .collect()
    }
}

/// Apply the display transform shared by every emitter
pub fn display_word(text: &str, force_uppercase: bool) -> String {
    let trimmed = text.trim();
    if force_uppercase {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS form, e.g. `#FFFF00`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// ASS style-record form with alpha, e.g. `&H0000FFFF` (AABBGGRR)
    pub fn to_ass_style(&self, alpha: u8) -> String {
        format!("&H{:02X}{:02X}{:02X}{:02X}", alpha, self.b, self.g, self.r)
    }

    /// ASS inline override form, e.g. `&H00FFFF&` (BBGGRR)
    pub fn to_ass_override(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}&", self.b, self.g, self.r)
    }
}

/// Highlight color for the active word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HighlightColor {
    White,
    #[default]
    Yellow,
    Red,
    Cyan,
    Green,
}

impl HighlightColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "white" => Some(Self::White),
            "yellow" => Some(Self::Yellow),
            "red" => Some(Self::Red),
            "cyan" => Some(Self::Cyan),
            "green" => Some(Self::Green),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Cyan => "Cyan",
            Self::Green => "Green",
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            Self::White => Rgb::new(0xFF, 0xFF, 0xFF),
            Self::Yellow => Rgb::new(0xFF, 0xFF, 0x00),
            Self::Red => Rgb::new(0xFF, 0x00, 0x00),
            Self::Cyan => Rgb::new(0x00, 0xFF, 0xFF),
            Self::Green => Rgb::new(0x00, 0xFF, 0x00),
        }
    }
}

/// Background treatment behind caption text; exactly one applies per render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackgroundStyle {
    #[default]
    Outline,
    Box,
    Shadow,
    ThreeD,
}

impl BackgroundStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "outline" => Some(Self::Outline),
            "box" => Some(Self::Box),
            "shadow" => Some(Self::Shadow),
            "3d" => Some(Self::ThreeD),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Box => "box",
            Self::Shadow => "shadow",
            Self::ThreeD => "3d",
        }
    }
}

/// Words shown per caption chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WordsPerChunk {
    One,
    #[default]
    Three,
    Full,
}

impl WordsPerChunk {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "1" | "one" => Some(Self::One),
            "3" | "three" => Some(Self::Three),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Three => "3",
            Self::Full => "full",
        }
    }

    /// Maximum words per chunk; `full_words` is the tunable cap for `Full`
    pub fn cap(&self, full_words: usize) -> usize {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Full => full_words.max(1),
        }
    }
}

/// Entrance animation applied when a chunk appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimationStyle {
    #[default]
    Pop,
    Bounce,
    Slide,
    Fade,
}

impl AnimationStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "pop" => Some(Self::Pop),
            "bounce" => Some(Self::Bounce),
            "slide" => Some(Self::Slide),
            "fade" => Some(Self::Fade),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Bounce => "bounce",
            Self::Slide => "slide",
            Self::Fade => "fade",
        }
    }
}

macro_rules! lenient_enum {
    ($ty:ident, $what:literal) => {
        impl $ty {
            /// Parse a name, falling back to the default for unrecognized values
            pub fn parse_or_default(name: &str) -> Self {
                Self::from_name(name).unwrap_or_else(|| {
                    let fallback = Self::default();
                    warn!(
                        "Unknown {} '{}', falling back to '{}'",
                        $what,
                        name,
                        fallback.name()
                    );
                    fallback
                })
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self::parse_or_default(&name)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.name().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

lenient_enum!(HighlightColor, "highlight color");
lenient_enum!(BackgroundStyle, "background style");
lenient_enum!(WordsPerChunk, "words-per-chunk value");
lenient_enum!(AnimationStyle, "animation style");

/// Closed, validated caption style configuration; immutable per render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font: String,
    pub highlight_color: HighlightColor,
    pub background_style: BackgroundStyle,
    pub force_uppercase: bool,
    pub words_per_chunk: WordsPerChunk,
    pub animation: AnimationStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: "Impact".to_string(),
            highlight_color: HighlightColor::Yellow,
            background_style: BackgroundStyle::Outline,
            force_uppercase: true,
            words_per_chunk: WordsPerChunk::Three,
            animation: AnimationStyle::Pop,
        }
    }
}

/// Output canvas resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Cue file container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueFormat {
    #[default]
    Ass,
    Srt,
}

impl CueFormat {
    /// Parse format string
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.trim().to_lowercase().as_str() {
            "ass" | "ssa" => Ok(Self::Ass),
            "srt" | "subrip" => Ok(Self::Srt),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid cue format: {}. Supported: ass, srt",
                format_str
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ass => "ass",
            Self::Srt => "srt",
        }
    }
}

/// How highlight progression is encoded in the cue file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CueLayout {
    /// One cue per word, the whole chunk repeated with the active word colored
    #[default]
    PerWord,
    /// One cue per chunk with timed color override codes
    PerChunk,
}

impl CueLayout {
    /// Parse layout string
    pub fn parse(layout_str: &str) -> Result<Self, DomainError> {
        match layout_str.trim().to_lowercase().as_str() {
            "per-word" | "word" => Ok(Self::PerWord),
            "per-chunk" | "chunk" => Ok(Self::PerChunk),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid cue layout: {}. Supported: per-word, per-chunk",
                layout_str
            ))),
        }
    }
}

/// Font size and vertical margin of one text role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRole {
    /// Optional fixed text (title or part label); unused for captions
    pub text: Option<String>,
    pub font_size: u32,
    pub margin_v: u32,
}

impl TextRole {
    fn new(font_size: u32, margin_v: u32) -> Self {
        Self {
            text: None,
            font_size,
            margin_v,
        }
    }
}

impl Default for TextRole {
    fn default() -> Self {
        Self::new(70, 380)
    }
}

/// Everything a single render needs besides the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    pub style: StyleConfig,
    pub fps: u32,
    pub canvas: Canvas,
    pub format: CueFormat,
    pub layout: CueLayout,
    /// Word cap used for `words_per_chunk = "full"`
    pub full_words: usize,
    pub caption: TextRole,
    pub title: TextRole,
    pub part: TextRole,
    /// Length of the rendered clip; overlays span it. Defaults to the last chunk end.
    pub clip_duration: Option<f64>,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            fps: 30,
            canvas: Canvas::default(),
            format: CueFormat::Ass,
            layout: CueLayout::PerWord,
            full_words: crate::domain::rules::DEFAULT_FULL_WORDS,
            caption: TextRole::new(70, 380),
            title: TextRole::new(90, 200),
            part: TextRole::new(130, 150),
            clip_duration: None,
        }
    }
}

impl CaptionSettings {
    /// Validate numeric settings
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.fps == 0 || self.fps > 240 {
            return Err(DomainError::BadArgs(format!(
                "Frame rate must be between 1 and 240, got {}",
                self.fps
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(DomainError::BadArgs(
                "Canvas dimensions cannot be zero".to_string(),
            ));
        }
        if self.full_words == 0 {
            return Err(DomainError::BadArgs(
                "full_words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Word cap for the configured words-per-chunk setting
    pub fn word_cap(&self) -> usize {
        self.style.words_per_chunk.cap(self.full_words)
    }
}
