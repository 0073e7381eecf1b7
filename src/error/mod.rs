//! Error handling module for Reelcap

use thiserror::Error;

/// Main error type for Reelcap I/O-facing operations
///
/// The caption engine itself never fails: bad timings are repaired and
/// unknown style names fall back to defaults. These variants cover reading
/// transcripts, parsing user input and writing artifacts.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Transcript file not found or inaccessible
    #[error("Transcript file not found: {path}")]
    TranscriptNotFound { path: String },

    /// Transcript document could not be decoded
    #[error("Failed to parse transcript {path}: {message}")]
    TranscriptParse { path: String, message: String },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Clip window validation error
    #[error("Invalid clip window: start ({start}) must be less than end ({end})")]
    InvalidWindow { start: String, end: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Output file write error
    #[error("Failed to write output file: {message}")]
    OutputError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for Reelcap operations
pub type CaptionResult<T> = std::result::Result<T, CaptionError>;
