//! Cue-file emission and output writing module

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::model::{CaptionSettings, CueFormat};
use crate::domain::rules::ResolvedStyle;
use crate::planner::CaptionTrack;

pub mod ass;
pub mod cues;
pub mod srt;
pub mod writer;

pub use ass::AssEmitter;
pub use cues::{CueBlock, CueProjector, Overlay, OverlayRole};
pub use srt::SrtEmitter;
pub use writer::OutputWriter;

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file path
    pub path: String,
    /// Overwrite policy
    pub overwrite: OverwritePolicy,
}

/// Overwrite policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Always overwrite
    #[default]
    Always,
    /// Never overwrite; an existing file is an error
    Never,
}

/// Renders a caption track in the configured cue format
pub struct CueEmitter;

impl CueEmitter {
    pub fn emit(track: &CaptionTrack, style: &ResolvedStyle, settings: &CaptionSettings) -> String {
        match settings.format {
            CueFormat::Ass => AssEmitter::new(style, settings).emit(track),
            CueFormat::Srt => SrtEmitter::new(style, settings.layout).emit(track),
        }
    }
}

/// A file produced by a render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenArtifact {
    pub path: String,
    pub format: CueFormat,
    /// Split-mode part number, if any
    pub part: Option<u32>,
    pub chunk_count: usize,
    pub word_count: usize,
    pub duration: f64,
    pub bytes: u64,
}
