// Batch interactor - Renders every transcript under a directory

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::render_interactor::{RenderInteractor, RenderResponse};
use crate::domain::errors::*;
use crate::domain::usecases::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// A transcript the batch could not render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub transcript_path: String,
    pub error: String,
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub rendered: Vec<RenderResponse>,
    pub failures: Vec<BatchFailure>,
}

impl BatchResponse {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Interactor for the batch use case
///
/// One bad transcript does not stop the batch; it is reported in
/// [`BatchResponse::failures`] and the remaining files are still rendered.
pub struct BatchInteractor {
    transcript_port: Arc<dyn TranscriptPort>,
    render_interactor: Arc<RenderInteractor>,
}

impl BatchInteractor {
    /// Create new batch interactor with injected ports
    pub fn new(transcript_port: Arc<dyn TranscriptPort>, render_interactor: Arc<RenderInteractor>) -> Self {
        Self {
            transcript_port,
            render_interactor,
        }
    }

    pub async fn execute(&self, request: BatchRequest) -> Result<BatchResponse, DomainError> {
        request.settings.validate()?;
        let transcripts = self.transcript_port.list_transcripts(&request.input_dir).await?;
        if transcripts.is_empty() {
            warn!("No transcripts found under {}", request.input_dir);
        } else {
            info!("Batch rendering {} transcripts", transcripts.len());
        }

        let out_dir = request.output_dir.as_deref().map(Path::new);
        let mut rendered = Vec::new();
        let mut failures = Vec::new();

        for transcript_path in transcripts {
            let output = PathUtils::default_output(
                Path::new(&transcript_path),
                out_dir,
                request.settings.format.extension(),
            )?;
            let mut render = RenderRequest::new(transcript_path.clone(), request.settings.clone());
            render.output_path = Some(output.to_string_lossy().to_string());
            render.overwrite = request.overwrite;

            match self.render_interactor.execute(render).await {
                Ok(response) => rendered.push(response),
                Err(e) => {
                    warn!("Skipping {}: {}", transcript_path, e);
                    failures.push(BatchFailure {
                        transcript_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchResponse { rendered, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FsArtifactAdapter, FsTranscriptAdapter};
    use crate::domain::model::{CaptionSettings, CueFormat};
    use crate::output::OverwritePolicy;
    use tempfile::TempDir;

    fn batch() -> BatchInteractor {
        let transcripts: Arc<dyn TranscriptPort> = Arc::new(FsTranscriptAdapter::new().unwrap());
        let artifacts: Arc<dyn ArtifactPort> = Arc::new(FsArtifactAdapter::new().unwrap());
        let render = Arc::new(RenderInteractor::new(Arc::clone(&transcripts), artifacts));
        BatchInteractor::new(transcripts, render)
    }

    #[tokio::test]
    async fn test_batch_renders_good_files_and_reports_bad_ones() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(
            input.path().join("a.json"),
            r#"[{"word":"hello","start":0,"end":0.4}]"#,
        )
        .unwrap();
        std::fs::write(
            input.path().join("b.yaml"),
            "words:\n  - text: world\n    start: 0\n    end: 0.5\n",
        )
        .unwrap();
        std::fs::write(input.path().join("c.json"), "{not json").unwrap();

        let mut settings = CaptionSettings::default();
        settings.format = CueFormat::Srt;
        let response = batch()
            .execute(BatchRequest {
                input_dir: input.path().to_string_lossy().to_string(),
                output_dir: Some(output.path().to_string_lossy().to_string()),
                settings,
                overwrite: OverwritePolicy::Always,
            })
            .await
            .unwrap();

        assert_eq!(response.rendered.len(), 2);
        assert_eq!(response.failures.len(), 1);
        assert!(response.failures[0].transcript_path.ends_with("c.json"));
        assert!(!response.is_complete());

        let a = std::fs::read_to_string(output.path().join("a.srt")).unwrap();
        assert!(a.contains("HELLO"));
        assert!(output.path().join("b.srt").is_file());
    }

    #[tokio::test]
    async fn test_batch_missing_directory_is_error() {
        let result = batch()
            .execute(BatchRequest {
                input_dir: "/no/such/dir".to_string(),
                output_dir: None,
                settings: CaptionSettings::default(),
                overwrite: OverwritePolicy::Always,
            })
            .await;
        assert!(matches!(result, Err(DomainError::FileNotFound(_))));
    }
}
