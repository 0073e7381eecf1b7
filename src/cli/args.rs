//! Command-line argument definitions

use clap::Args;
use clap_num::number_range;

use crate::domain::usecases::{MAX_PARTS, MIN_PART_SECS};

fn parse_fps(s: &str) -> Result<u32, String> {
    number_range(s, 1, 240)
}

fn parse_full_words(s: &str) -> Result<usize, String> {
    number_range(s, 1, 64)
}

fn parse_parts(s: &str) -> Result<u32, String> {
    number_range(s, 1, MAX_PARTS)
}

fn parse_split_seconds(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !secs.is_finite() || secs < MIN_PART_SECS {
        return Err(format!("must be at least {} seconds", MIN_PART_SECS));
    }
    Ok(secs)
}

/// Style flags shared by every command that renders captions
///
/// Unset flags keep the value from the config file or environment.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Font family
    #[arg(long)]
    pub font: Option<String>,

    /// Highlight color (White, Yellow, Red, Cyan, Green)
    #[arg(long)]
    pub highlight_color: Option<String>,

    /// Background style (outline, box, shadow, 3d)
    #[arg(long)]
    pub background: Option<String>,

    /// Force uppercase display text (true/false)
    #[arg(long)]
    pub uppercase: Option<bool>,

    /// Words per chunk (1, 3, full)
    #[arg(long)]
    pub words_per_chunk: Option<String>,

    /// Entrance animation (pop, bounce, slide, fade)
    #[arg(long)]
    pub animation: Option<String>,

    /// Frame rate of the overlay renderer (1-240)
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<u32>,

    /// Word cap used by --words-per-chunk full
    #[arg(long, value_parser = parse_full_words)]
    pub full_words: Option<usize>,
}

/// Optional clip window in source time
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Window start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, requires = "end")]
    pub start: Option<String>,

    /// Window end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, requires = "start")]
    pub end: Option<String>,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Transcript file (JSON or YAML)
    #[arg(short, long)]
    pub transcript: String,

    /// Output cue file (default: next to the transcript)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Cue format (ass, srt); inferred from --output when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Cue layout (per-word, per-chunk)
    #[arg(long)]
    pub layout: Option<String>,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Split into parts of this many seconds (at least 1)
    #[arg(long, conflicts_with = "parts", value_parser = parse_split_seconds)]
    pub split_seconds: Option<f64>,

    /// Split into this many equal parts (1-999)
    #[arg(long, value_parser = parse_parts)]
    pub parts: Option<u32>,

    /// Title overlay text
    #[arg(long)]
    pub title: Option<String>,

    /// Part label overlay text
    #[arg(long)]
    pub part_label: Option<String>,

    /// Write a JSON render report to this path
    #[arg(long)]
    pub report: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the frames command
#[derive(Args, Debug)]
pub struct FramesArgs {
    /// Transcript file (JSON or YAML)
    #[arg(short, long)]
    pub transcript: String,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Print the props at this frame instead of the whole timeline
    #[arg(long)]
    pub at: Option<u64>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Transcript file (JSON or YAML)
    #[arg(short, long)]
    pub transcript: String,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory searched for transcripts
    #[arg(short, long)]
    pub dir: String,

    /// Directory for cue files (default: next to each transcript)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Cue format (ass, srt)
    #[arg(long)]
    pub format: Option<String>,

    /// Cue layout (per-word, per-chunk)
    #[arg(long)]
    pub layout: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_range() {
        assert_eq!(parse_fps("60"), Ok(60));
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("241").is_err());
        assert!(parse_fps("fast").is_err());
    }
}
