// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::output::OverwritePolicy;
use crate::transcript::Transcript;
use async_trait::async_trait;

/// Port for reading transcripts produced by the transcription collaborator
#[async_trait]
pub trait TranscriptPort: Send + Sync {
    /// Read and decode a transcript document
    async fn read_transcript(&self, file_path: &str) -> Result<Transcript, DomainError>;

    /// List transcript documents under a directory, sorted by path
    async fn list_transcripts(&self, dir_path: &str) -> Result<Vec<String>, DomainError>;
}

/// Port for layered caption configuration
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Defaults, overlaid by the configuration file, overlaid by the environment
    ///
    /// With no explicit path the default file is used when it exists.
    async fn load_settings(&self, file_path: Option<&str>) -> Result<CaptionSettings, DomainError>;

    /// Path of the file the last load read, if any
    async fn get_config_file_path(&self) -> Option<String>;
}

/// Port for writing rendered artifacts
#[async_trait]
pub trait ArtifactPort: Send + Sync {
    /// Write a text artifact atomically, returning its size in bytes
    async fn write_artifact(
        &self,
        file_path: &str,
        contents: String,
        overwrite: OverwritePolicy,
    ) -> Result<u64, DomainError>;
}
