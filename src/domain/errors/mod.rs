// Domain errors - Error types for the domain layer

use std::fmt;

use crate::error::CaptionError;

/// Domain-specific error types
#[derive(Debug, Clone)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Invalid document format
    InvalidFormat(String),
    /// Invalid time range
    InvalidTimeRange(String),
    /// File system failure
    FsFail(String),
    /// Configuration could not be loaded or validated
    ConfigFail(String),
    /// Processing error
    ProcessingError(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            DomainError::InvalidTimeRange(msg) => write!(f, "Invalid time range: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::ConfigFail(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<CaptionError> for DomainError {
    fn from(err: CaptionError) -> Self {
        match err {
            CaptionError::TranscriptNotFound { path } => DomainError::FileNotFound(path),
            CaptionError::TranscriptParse { .. } => DomainError::InvalidFormat(err.to_string()),
            CaptionError::InvalidTimeFormat { .. } => DomainError::BadArgs(err.to_string()),
            CaptionError::InvalidWindow { .. } => DomainError::InvalidTimeRange(err.to_string()),
            CaptionError::ConfigError { message } => DomainError::ConfigFail(message),
            CaptionError::OutputError { message } => DomainError::FsFail(message),
            CaptionError::IoError(e) => DomainError::FsFail(e.to_string()),
            CaptionError::JsonError(e) => DomainError::InvalidFormat(e.to_string()),
        }
    }
}
