//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, ChunkSummary, InspectResponse};
use crate::cli::args::{BatchArgs, FramesArgs, InspectArgs, RenderArgs, WindowArgs};
use crate::domain::model::{CaptionSettings, ClipWindow, TimeSpec};
use crate::domain::usecases::{BatchRequest, InspectRequest, RenderRequest, SplitMode};
use crate::output::{OverwritePolicy, WrittenArtifact};
use crate::utils::time::TimeParser;
use crate::utils::Utils;

/// Execute the render command
pub async fn render(
    container: &dyn AppContainer,
    settings: CaptionSettings,
    args: RenderArgs,
    overwrite: OverwritePolicy,
) -> Result<()> {
    info!("Starting render operation");
    info!("Transcript: {}", args.transcript);

    let mut request = RenderRequest::new(args.transcript.clone(), settings);
    request.output_path = args.output;
    request.window = parse_window(&args.window)?;
    request.split = match (args.split_seconds, args.parts) {
        (Some(secs), _) => Some(SplitMode::EverySeconds(secs)),
        (None, Some(parts)) => Some(SplitMode::Parts(parts)),
        (None, None) => None,
    };
    request.report_path = args.report;
    request.overwrite = overwrite;

    let response = container
        .render_interactor()
        .execute(request)
        .await
        .with_context(|| format!("Failed to render {}", args.transcript))?;

    if response.artifacts.is_empty() {
        warn!("No cue files written for {}", args.transcript);
    }
    for artifact in &response.artifacts {
        println!("{}", describe_artifact(artifact));
    }
    if let Some(report) = &response.report_path {
        println!("Report: {}", report);
    }
    Ok(())
}

/// Execute the frames command
pub async fn frames(container: &dyn AppContainer, settings: CaptionSettings, args: FramesArgs) -> Result<()> {
    info!("Starting frames operation");
    let response = inspect_transcript(container, settings, &args.transcript, &args.window, args.at).await?;

    let json = match args.at {
        Some(_) => serde_json::to_string_pretty(&response.frame),
        None => serde_json::to_string_pretty(&response.timeline),
    }
    .context("Failed to serialize frame data to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, settings: CaptionSettings, args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    let response = inspect_transcript(container, settings, &args.transcript, &args.window, None).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&response.chunks)
            .context("Failed to serialize chunks to JSON")?;
        println!("{}", json);
    } else {
        display_chunks(&response);
    }
    Ok(())
}

/// Execute the batch command
pub async fn batch(
    container: &dyn AppContainer,
    settings: CaptionSettings,
    args: BatchArgs,
    overwrite: OverwritePolicy,
) -> Result<()> {
    info!("Starting batch operation in {}", args.dir);

    let response = container
        .batch_interactor()
        .execute(BatchRequest {
            input_dir: args.dir.clone(),
            output_dir: args.out_dir,
            settings,
            overwrite,
        })
        .await
        .with_context(|| format!("Failed to batch render {}", args.dir))?;

    for artifact in response.rendered.iter().flat_map(|r| &r.artifacts) {
        println!("{}", describe_artifact(artifact));
    }
    for failure in &response.failures {
        eprintln!("Failed: {}: {}", failure.transcript_path, failure.error);
    }

    if response.is_complete() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} transcripts failed",
            response.failures.len(),
            response.failures.len() + response.rendered.len()
        ))
    }
}

async fn inspect_transcript(
    container: &dyn AppContainer,
    settings: CaptionSettings,
    transcript: &str,
    window: &WindowArgs,
    at_frame: Option<u64>,
) -> Result<InspectResponse> {
    let request = InspectRequest {
        transcript_path: transcript.to_string(),
        window: parse_window(window)?,
        settings,
        at_frame,
    };
    container
        .inspect_interactor()
        .execute(request)
        .await
        .with_context(|| format!("Failed to inspect {}", transcript))
}

/// Parse `--start`/`--end` into a clip window
fn parse_window(args: &WindowArgs) -> Result<Option<ClipWindow>> {
    let (Some(start), Some(end)) = (&args.start, &args.end) else {
        return Ok(None);
    };
    let parser = TimeParser::new();
    let start_seconds = parser
        .parse_time(start)
        .with_context(|| format!("Invalid start time '{}'", start))?;
    let end_seconds = parser
        .parse_time(end)
        .with_context(|| format!("Invalid end time '{}'", end))?;
    let window = ClipWindow::new(
        TimeSpec::from_seconds(start_seconds),
        TimeSpec::from_seconds(end_seconds),
    )
    .context("Invalid clip window")?;
    Ok(Some(window))
}

fn describe_artifact(artifact: &WrittenArtifact) -> String {
    format!(
        "Wrote {} ({} chunks, {} words, {}, {})",
        artifact.path,
        artifact.chunk_count,
        artifact.word_count,
        Utils::format_seconds(artifact.duration),
        Utils::format_file_size(artifact.bytes)
    )
}

fn display_chunks(response: &InspectResponse) {
    println!("Transcript: {}", response.transcript_path);
    println!("Frame rate: {} fps", response.fps);
    println!("Chunks:     {}", response.chunks.len());
    println!();

    for chunk in &response.chunks {
        println!("{}", format_chunk_row(chunk));
    }
}

fn format_chunk_row(chunk: &ChunkSummary) -> String {
    format!(
        "{:>4}  {:>8.3}s - {:>8.3}s  [{:>6}, {:>6})  {:>3}%  {:<16} {}",
        chunk.index,
        chunk.start,
        chunk.end,
        chunk.start_frame,
        chunk.end_frame,
        chunk.scale,
        format!("{:?}", chunk.close_reason),
        chunk.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CloseReason, CueFormat};

    #[test]
    fn test_parse_window() {
        let window = parse_window(&WindowArgs {
            start: Some("00:01:00".to_string()),
            end: Some("90".to_string()),
        })
        .unwrap()
        .unwrap();
        assert_eq!(window.start.seconds, 60.0);
        assert_eq!(window.end.seconds, 90.0);

        assert!(parse_window(&WindowArgs::default()).unwrap().is_none());
        assert!(parse_window(&WindowArgs {
            start: Some("90".to_string()),
            end: Some("60".to_string()),
        })
        .is_err());
    }

    #[test]
    fn test_chunk_row_layout() {
        let row = format_chunk_row(&ChunkSummary {
            index: 2,
            text: "VIRAL".to_string(),
            start: 1.0,
            end: 1.65,
            start_frame: 30,
            end_frame: 50,
            word_count: 1,
            scale: 100,
            close_reason: CloseReason::EndOfTranscript,
        });
        assert!(row.starts_with("   2     1.000s -    1.650s  [    30,     50)  100%"));
        assert!(row.ends_with("EndOfTranscript  VIRAL"));
    }

    #[test]
    fn test_describe_artifact() {
        let line = describe_artifact(&WrittenArtifact {
            path: "out.ass".to_string(),
            format: CueFormat::Ass,
            part: None,
            chunk_count: 2,
            word_count: 6,
            duration: 3.0,
            bytes: 2048,
        });
        assert!(line.starts_with("Wrote out.ass (2 chunks, 6 words, "));
        assert!(line.ends_with("2.00 KB)"));
    }
}
