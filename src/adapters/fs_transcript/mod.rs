// Filesystem transcript adapter - Reads JSON/YAML transcript documents

use crate::domain::errors::*;
use crate::ports::*;
use crate::transcript::{Transcript, TranscriptFormat};
use crate::utils::path::PathUtils;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem transcript adapter
pub struct FsTranscriptAdapter {
    max_depth: usize,
}

impl FsTranscriptAdapter {
    /// Create new filesystem transcript adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self { max_depth: 8 })
    }

    /// Limit how deep batch listing descends
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn list_blocking(dir_path: &str, max_depth: usize) -> Result<Vec<String>, DomainError> {
        let root = Path::new(dir_path);
        if !root.is_dir() {
            return Err(DomainError::FileNotFound(format!(
                "Not a directory: {}",
                dir_path
            )));
        }

        let mut found: Vec<String> = WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && PathUtils::is_transcript(entry.path()))
            .map(|entry| entry.path().to_string_lossy().to_string())
            .collect();
        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl TranscriptPort for FsTranscriptAdapter {
    async fn read_transcript(&self, file_path: &str) -> Result<Transcript, DomainError> {
        let path = Path::new(file_path);
        if !path.is_file() {
            return Err(DomainError::FileNotFound(file_path.to_string()));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to read {}: {}", file_path, e)))?;

        let transcript = Transcript::parse(&content, TranscriptFormat::from_path(path), file_path)?;
        debug!(
            "Read {} words and {} segments from {}",
            transcript.words.len(),
            transcript.segments.len(),
            file_path
        );
        Ok(transcript)
    }

    async fn list_transcripts(&self, dir_path: &str) -> Result<Vec<String>, DomainError> {
        let dir = dir_path.to_string();
        let max_depth = self.max_depth;
        tokio::task::spawn_blocking(move || Self::list_blocking(&dir, max_depth))
            .await
            .map_err(|e| DomainError::InternalError(format!("Listing task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_json_transcript() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"[{"word":"hi","start":0,"end":0.4}]"#).unwrap();

        let adapter = FsTranscriptAdapter::new().unwrap();
        let transcript = adapter
            .read_transcript(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(transcript.words.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_transcript() {
        let adapter = FsTranscriptAdapter::new().unwrap();
        let err = adapter.read_transcript("/definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, DomainError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_transcript_is_invalid_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{oops").unwrap();
        let adapter = FsTranscriptAdapter::new().unwrap();
        let err = adapter.read_transcript(&path.to_string_lossy()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidFormat(_)));
    }

    #[tokio::test]
    async fn test_list_transcripts_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("sub/a.yaml"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let adapter = FsTranscriptAdapter::new().unwrap();
        let found = adapter
            .list_transcripts(&dir.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("b.json"));
        assert!(found[1].ends_with("a.yaml"));
    }
}
