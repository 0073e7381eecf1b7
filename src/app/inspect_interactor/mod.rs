// Inspect interactor - Chunk boundaries, auto-fit scales and frame state

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::usecases::*;
use crate::engine::{CaptionEngine, FrameProps};
use crate::planner::FrameTimeline;
use crate::ports::*;
use crate::transcript::TranscriptWindow;

/// One chunk as shown by `inspect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub start_frame: u64,
    pub end_frame: u64,
    pub word_count: usize,
    /// Auto-fit scale in percent
    pub scale: u32,
    pub close_reason: CloseReason,
}

/// Result of an inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResponse {
    pub transcript_path: String,
    pub fps: u32,
    pub chunks: Vec<ChunkSummary>,
    pub timeline: FrameTimeline,
    /// Frame props at the requested frame; `None` when none was requested
    /// or nothing is visible there
    pub frame: Option<FrameProps>,
}

/// Interactor for the inspect and frames use cases
pub struct InspectInteractor {
    transcript_port: Arc<dyn TranscriptPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(transcript_port: Arc<dyn TranscriptPort>) -> Self {
        Self { transcript_port }
    }

    pub async fn execute(&self, request: InspectRequest) -> Result<InspectResponse, DomainError> {
        request.settings.validate()?;
        info!("Inspecting captions for: {}", request.transcript_path);

        let transcript = self
            .transcript_port
            .read_transcript(&request.transcript_path)
            .await?;
        let mut words = transcript.word_timings();
        let mut settings = request.settings;
        if let Some(window) = &request.window {
            words = TranscriptWindow::select(&words, window);
            settings.clip_duration = Some(window.duration());
        }

        let engine = CaptionEngine::new(settings);
        let track = engine.plan(&words);
        let timeline = engine.frame_timeline(&track);
        let force_uppercase = engine.style().force_uppercase;

        let chunks = track
            .chunks
            .iter()
            .zip(&timeline.chunks)
            .map(|(chunk, frames)| ChunkSummary {
                index: chunk.index,
                text: chunk.display_text(force_uppercase),
                start: chunk.start,
                end: chunk.end,
                start_frame: frames.start_frame,
                end_frame: frames.end_frame,
                word_count: chunk.word_count(),
                scale: frames.scale,
                close_reason: chunk.close_reason,
            })
            .collect();

        let frame = request
            .at_frame
            .and_then(|f| engine.frame_emitter(&track).props_at(f));
        if let Some(at) = request.at_frame {
            debug!("Frame {}: {}", at, if frame.is_some() { "visible" } else { "blank" });
        }

        Ok(InspectResponse {
            transcript_path: request.transcript_path,
            fps: engine.settings().fps,
            chunks,
            timeline,
            frame,
        })
    }
}
