// Render interactor - Orchestrates transcript-to-cue-file rendering

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::usecases::*;
use crate::engine::CaptionEngine;
use crate::output::{OverwritePolicy, WrittenArtifact};
use crate::ports::*;
use crate::transcript::TranscriptWindow;
use crate::utils::path::PathUtils;

/// JSON manifest of one render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderReport {
    pub generated_at: DateTime<Utc>,
    pub transcript: String,
    pub fps: u32,
    pub artifacts: Vec<WrittenArtifact>,
}

/// Result of a render
#[derive(Debug, Clone)]
pub struct RenderResponse {
    pub transcript_path: String,
    /// Written cue files, ordered by part number
    pub artifacts: Vec<WrittenArtifact>,
    pub report_path: Option<String>,
}

impl RenderResponse {
    pub fn total_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.bytes).sum()
    }
}

struct RenderJob {
    part: Option<u32>,
    output_path: String,
    words: Vec<Word>,
    settings: CaptionSettings,
}

/// Interactor for the render use case
pub struct RenderInteractor {
    transcript_port: Arc<dyn TranscriptPort>,
    artifact_port: Arc<dyn ArtifactPort>,
    max_concurrency: usize,
}

impl RenderInteractor {
    /// Create new render interactor with injected ports
    pub fn new(transcript_port: Arc<dyn TranscriptPort>, artifact_port: Arc<dyn ArtifactPort>) -> Self {
        Self {
            transcript_port,
            artifact_port,
            max_concurrency: num_cpus::get().max(1),
        }
    }

    /// Bound the number of split-mode parts rendered at once
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Render a transcript into one cue file, or one per split-mode part
    pub async fn execute(&self, request: RenderRequest) -> Result<RenderResponse, DomainError> {
        request.validate()?;
        info!("Rendering captions for: {}", request.transcript_path);

        let transcript = self
            .transcript_port
            .read_transcript(&request.transcript_path)
            .await?;

        let mut words = transcript.word_timings();
        let mut total_duration = transcript.duration();
        if let Some(window) = &request.window {
            words = TranscriptWindow::select(&words, window);
            total_duration = window.duration();
            debug!(
                "Clip window {} - {} keeps {} words",
                window.start.format_hms(),
                window.end.format_hms(),
                words.len()
            );
        }

        let output_base = Self::output_base(&request)?;
        let jobs = Self::plan_jobs(&request, words, total_duration, &output_base)?;
        let artifacts = self.run_jobs(jobs, request.overwrite).await?;

        let report_path = match &request.report_path {
            Some(path) => {
                self.write_report(path, &request, &artifacts).await?;
                Some(path.clone())
            }
            None => None,
        };

        info!(
            "Render finished: {} file(s) for {}",
            artifacts.len(),
            request.transcript_path
        );
        Ok(RenderResponse {
            transcript_path: request.transcript_path,
            artifacts,
            report_path,
        })
    }

    fn output_base(request: &RenderRequest) -> Result<PathBuf, DomainError> {
        match &request.output_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(PathUtils::default_output(
                Path::new(&request.transcript_path),
                None,
                request.settings.format.extension(),
            )?),
        }
    }

    fn plan_jobs(
        request: &RenderRequest,
        words: Vec<Word>,
        total_duration: f64,
        output_base: &Path,
    ) -> Result<Vec<RenderJob>, DomainError> {
        let Some(split) = request.split else {
            let mut settings = request.settings.clone();
            if let Some(window) = &request.window {
                settings.clip_duration = Some(window.duration());
            }
            return Ok(vec![RenderJob {
                part: None,
                output_path: output_base.to_string_lossy().to_string(),
                words,
                settings,
            }]);
        };

        let parts = PartPlanner::plan(total_duration, split)?;
        if parts.is_empty() {
            warn!("Nothing to split: {} has no timed words", request.transcript_path);
        }

        parts
            .into_iter()
            .map(|part| {
                let mut settings = request.settings.clone();
                settings.part.text = Some(part.label.clone());
                settings.clip_duration = Some(part.window.duration());
                let output = PathUtils::part_output(output_base, part.number)?;
                Ok(RenderJob {
                    part: Some(part.number),
                    output_path: output.to_string_lossy().to_string(),
                    words: TranscriptWindow::select_by_start(&words, &part.window),
                    settings,
                })
            })
            .collect()
    }

    async fn run_jobs(
        &self,
        jobs: Vec<RenderJob>,
        overwrite: OverwritePolicy,
    ) -> Result<Vec<WrittenArtifact>, DomainError> {
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for job in jobs {
            let permits = Arc::clone(&permits);
            let artifact_port = Arc::clone(&self.artifact_port);
            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| DomainError::InternalError(e.to_string()))?;
                Self::run_job(job, artifact_port, overwrite).await
            });
        }

        let mut artifacts = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let artifact = joined
                .map_err(|e| DomainError::InternalError(format!("Render task failed: {}", e)))??;
            artifacts.push(artifact);
        }
        artifacts.sort_by_key(|a| a.part);
        Ok(artifacts)
    }

    async fn run_job(
        job: RenderJob,
        artifact_port: Arc<dyn ArtifactPort>,
        overwrite: OverwritePolicy,
    ) -> Result<WrittenArtifact, DomainError> {
        let RenderJob {
            part,
            output_path,
            words,
            settings,
        } = job;
        let format = settings.format;
        let clip_duration = settings.clip_duration;

        let render = tokio::task::spawn_blocking(move || CaptionEngine::new(settings).render(&words))
            .await
            .map_err(|e| DomainError::InternalError(format!("Engine task failed: {}", e)))?;

        let chunk_count = render.track.len();
        let word_count = render.track.word_count();
        let duration = clip_duration.unwrap_or_else(|| render.track.end());
        let bytes = artifact_port
            .write_artifact(&output_path, render.cues, overwrite)
            .await?;
        info!("Wrote {} ({} chunks, {} bytes)", output_path, chunk_count, bytes);

        Ok(WrittenArtifact {
            path: output_path,
            format,
            part,
            chunk_count,
            word_count,
            duration,
            bytes,
        })
    }

    async fn write_report(
        &self,
        path: &str,
        request: &RenderRequest,
        artifacts: &[WrittenArtifact],
    ) -> Result<(), DomainError> {
        let report = RenderReport {
            generated_at: Utc::now(),
            transcript: request.transcript_path.clone(),
            fps: request.settings.fps,
            artifacts: artifacts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| DomainError::InternalError(format!("Failed to encode report: {}", e)))?;
        self.artifact_port
            .write_artifact(path, json, request.overwrite)
            .await?;
        debug!("Wrote render report: {}", path);
        Ok(())
    }
}
