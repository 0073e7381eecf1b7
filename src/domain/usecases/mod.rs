// Domain use cases - Requests and split-mode part planning

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::output::OverwritePolicy;

/// Most parts a single split render may produce
pub const MAX_PARTS: u32 = 999;
/// Shortest part length accepted by `SplitMode::EverySeconds`
pub const MIN_PART_SECS: f64 = 1.0;
/// Tolerance when dividing a duration into fixed-length parts
const PART_EPSILON: f64 = 1e-9;

/// How a long transcript is cut into independently rendered parts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Parts of a fixed length in seconds; the last part takes the remainder
    EverySeconds(f64),
    /// A fixed number of equal parts
    Parts(u32),
}

impl SplitMode {
    pub fn validate(&self) -> Result<(), DomainError> {
        match *self {
            SplitMode::EverySeconds(secs) if !(secs.is_finite() && secs >= MIN_PART_SECS) => {
                Err(DomainError::BadArgs(format!(
                    "Part length must be at least {} seconds, got {}",
                    MIN_PART_SECS, secs
                )))
            }
            SplitMode::Parts(n) if n == 0 || n > MAX_PARTS => Err(DomainError::BadArgs(format!(
                "Part count must be between 1 and {}, got {}",
                MAX_PARTS, n
            ))),
            _ => Ok(()),
        }
    }
}

/// One split-mode part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    /// 1-based part number
    pub number: u32,
    pub window: ClipWindow,
    pub label: String,
}

/// Plans split-mode part windows over a transcript's duration
pub struct PartPlanner;

impl PartPlanner {
    /// Windows covering `[0, total_duration)`; empty when there is nothing to split
    pub fn plan(total_duration: f64, mode: SplitMode) -> Result<Vec<PartSpec>, DomainError> {
        mode.validate()?;
        if !(total_duration.is_finite() && total_duration > 0.0) {
            return Ok(Vec::new());
        }

        let (count, step) = match mode {
            SplitMode::EverySeconds(secs) => {
                let count = (total_duration / secs - PART_EPSILON).ceil().max(1.0);
                if count > MAX_PARTS as f64 {
                    return Err(DomainError::BadArgs(format!(
                        "{}s parts over {:.3}s would need {} parts, more than {}",
                        secs, total_duration, count, MAX_PARTS
                    )));
                }
                (count as u32, secs)
            }
            SplitMode::Parts(n) => (n, total_duration / n as f64),
        };

        (0..count)
            .map(|k| {
                let start = k as f64 * step;
                let end = if k + 1 == count {
                    total_duration
                } else {
                    (k + 1) as f64 * step
                };
                let window = ClipWindow::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end))?;
                Ok(PartSpec {
                    number: k + 1,
                    window,
                    label: format!("Part {}", k + 1),
                })
            })
            .collect()
    }
}

/// Render a transcript into a cue file
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub transcript_path: String,
    pub output_path: Option<String>,
    pub window: Option<ClipWindow>,
    pub split: Option<SplitMode>,
    pub settings: CaptionSettings,
    pub report_path: Option<String>,
    pub overwrite: OverwritePolicy,
}

impl RenderRequest {
    pub fn new(transcript_path: String, settings: CaptionSettings) -> Self {
        Self {
            transcript_path,
            output_path: None,
            window: None,
            split: None,
            settings,
            report_path: None,
            overwrite: OverwritePolicy::Always,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.transcript_path.trim().is_empty() {
            return Err(DomainError::BadArgs(
                "Transcript path cannot be empty".to_string(),
            ));
        }
        if let Some(split) = &self.split {
            split.validate()?;
        }
        self.settings.validate()
    }
}

/// Inspect the chunk list of a transcript, or the frame state at one frame
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub transcript_path: String,
    pub window: Option<ClipWindow>,
    pub settings: CaptionSettings,
    pub at_frame: Option<u64>,
}

/// Render every transcript found under a directory
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input_dir: String,
    pub output_dir: Option<String>,
    pub settings: CaptionSettings,
    pub overwrite: OverwritePolicy,
}
