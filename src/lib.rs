//! Reelcap caption engine library
//!
//! Turns word-level transcripts into word-synchronised captions for vertical
//! short-form video. One segmentation pass drives two renderings: a
//! frame-indexed timeline for an animated overlay and a timed cue file
//! (ASS or SRT) for burn-in.
//!
//! ```no_run
//! use reelcap_cli::{CaptionEngine, CaptionSettings, Word};
//!
//! let engine = CaptionEngine::new(CaptionSettings::default());
//! let render = engine.render(&[Word::new("hello", 0.0, 0.4), Word::new("world", 0.4, 0.9)]);
//! println!("{}", render.cues);
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod transcript;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{CaptionSettings, Chunk, StyleConfig, Word};
pub use engine::{CaptionEngine, CaptionRender, FrameEmitter, FrameProps};
pub use error::{CaptionError, CaptionResult};
pub use planner::{CaptionTrack, FrameTimeline};
