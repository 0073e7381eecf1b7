// Filesystem artifact adapter - Atomic cue-file and report writes

use crate::domain::errors::*;
use crate::output::{OutputConfig, OutputWriter, OverwritePolicy};
use crate::ports::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Filesystem artifact adapter backed by [`OutputWriter`]
pub struct FsArtifactAdapter {
    writer: Arc<OutputWriter>,
}

impl FsArtifactAdapter {
    /// Create new filesystem artifact adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self {
            writer: Arc::new(OutputWriter::new()),
        })
    }
}

#[async_trait]
impl ArtifactPort for FsArtifactAdapter {
    async fn write_artifact(
        &self,
        file_path: &str,
        contents: String,
        overwrite: OverwritePolicy,
    ) -> Result<u64, DomainError> {
        let writer = Arc::clone(&self.writer);
        let config = OutputConfig {
            path: file_path.to_string(),
            overwrite,
        };
        tokio::task::spawn_blocking(move || writer.write_output(&config, &contents))
            .await
            .map_err(|e| DomainError::InternalError(format!("Write task failed: {}", e)))?
            .map_err(DomainError::from)
    }
}
