//! Transcript documents, normalization and windowing
//!
//! Transcripts come from an external transcription collaborator and are
//! treated as untrusted: times may be strings, missing, negative or out of
//! order. Nothing in this module rejects a document for bad timings; that is
//! the normalizer's job.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::domain::model::Word;
use crate::error::{CaptionError, CaptionResult};

pub mod normalizer;
pub mod window;

pub use normalizer::TranscriptNormalizer;
pub use window::TranscriptWindow;

/// A word as delivered by the transcriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(alias = "text", default)]
    pub word: String,
    #[serde(deserialize_with = "lenient_seconds", default = "missing_seconds")]
    pub start: f64,
    #[serde(deserialize_with = "lenient_seconds", default = "missing_seconds")]
    pub end: f64,
}

/// A sentence-level segment, used when no word timings are available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub text: String,
    #[serde(deserialize_with = "lenient_seconds", default = "missing_seconds")]
    pub start: f64,
    #[serde(deserialize_with = "lenient_seconds", default = "missing_seconds")]
    pub end: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Words(Vec<RawWord>),
    Full {
        #[serde(default)]
        words: Vec<RawWord>,
        #[serde(default)]
        segments: Vec<RawSegment>,
    },
}

/// Parsed transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub words: Vec<RawWord>,
    pub segments: Vec<RawSegment>,
}

/// On-disk transcript encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    Json,
    Yaml,
}

impl TranscriptFormat {
    /// Pick the encoding from a file extension; anything unknown is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl Transcript {
    pub fn from_words(words: Vec<RawWord>) -> Self {
        Self {
            words,
            segments: Vec::new(),
        }
    }

    /// Decode a transcript document; `origin` is only used in error messages
    pub fn parse(content: &str, format: TranscriptFormat, origin: &str) -> CaptionResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: TranscriptDocument = match format {
            TranscriptFormat::Json => {
                serde_json::from_str(content).map_err(|e| CaptionError::TranscriptParse {
                    path: origin.to_string(),
                    message: e.to_string(),
                })?
            }
            TranscriptFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| CaptionError::TranscriptParse {
                    path: origin.to_string(),
                    message: e.to_string(),
                })?
            }
        };

        Ok(match document {
            TranscriptDocument::Words(words) => Self::from_words(words),
            TranscriptDocument::Full { words, segments } => Self { words, segments },
        })
    }

    /// Word timings, falling back to evenly split segments when the
    /// transcriber produced no word-level data
    pub fn word_timings(&self) -> Vec<Word> {
        if !self.words.is_empty() {
            return self
                .words
                .iter()
                .map(|w| Word::new(w.word.clone(), w.start, w.end))
                .collect();
        }

        if !self.segments.is_empty() {
            debug!(
                "No word timings, splitting {} segments evenly",
                self.segments.len()
            );
        }
        self.segments.iter().flat_map(split_segment).collect()
    }

    /// End of the last timed word
    pub fn duration(&self) -> f64 {
        self.word_timings()
            .iter()
            .map(|w| w.end)
            .filter(|end| end.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Divide a segment's duration evenly among its whitespace-separated words
fn split_segment(segment: &RawSegment) -> Vec<Word> {
    let texts: Vec<&str> = segment.text.split_whitespace().collect();
    if texts.is_empty() {
        return Vec::new();
    }
    let per_word = (segment.end - segment.start) / texts.len() as f64;
    texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            Word::new(
                *text,
                segment.start + idx as f64 * per_word,
                segment.start + (idx + 1) as f64 * per_word,
            )
        })
        .collect()
}

fn missing_seconds() -> f64 {
    f64::NAN
}

/// Accept numbers, numeric strings and null; anything unparsable becomes NaN
fn lenient_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(f64),
        Text(String),
        Null(Option<()>),
    }

    Ok(match Seconds::deserialize(deserializer)? {
        Seconds::Number(n) => n,
        Seconds::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        Seconds::Null(_) => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_word_array() {
        let transcript = Transcript::parse(
            r#"[{"word":"THIS","start":0,"end":0.5},{"text":"IS","start":"0.5","end":1.0}]"#,
            TranscriptFormat::Json,
            "inline",
        )
        .unwrap();
        let words = transcript.word_timings();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].text, "IS");
        assert_eq!(words[1].start, 0.5);
    }

    #[test]
    fn test_parse_full_document_with_nulls() {
        let transcript = Transcript::parse(
            r#"{"words":[{"word":"hi","start":null,"end":0.3}],"segments":[]}"#,
            TranscriptFormat::Json,
            "inline",
        )
        .unwrap();
        assert!(transcript.words[0].start.is_nan());
        assert_eq!(transcript.words[0].end, 0.3);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "words:\n  - word: hello\n    start: 1.0\n    end: 1.4\n";
        let transcript = Transcript::parse(yaml, TranscriptFormat::Yaml, "inline.yaml").unwrap();
        assert_eq!(transcript.words.len(), 1);
        assert_eq!(transcript.duration(), 1.4);
    }

    #[test]
    fn test_empty_document_is_empty_transcript() {
        let transcript = Transcript::parse("  ", TranscriptFormat::Json, "inline").unwrap();
        assert!(transcript.word_timings().is_empty());
        assert_eq!(transcript.duration(), 0.0);
    }

    #[test]
    fn test_malformed_document_is_error() {
        let err = Transcript::parse("{not json", TranscriptFormat::Json, "bad.json").unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_segment_fallback_splits_evenly() {
        let transcript = Transcript {
            words: Vec::new(),
            segments: vec![RawSegment {
                text: "one two three four".to_string(),
                start: 2.0,
                end: 4.0,
            }],
        };
        let words = transcript.word_timings();
        assert_eq!(words.len(), 4);
        assert_eq!(words[0].start, 2.0);
        assert_eq!(words[1].start, 2.5);
        assert_eq!(words[3].end, 4.0);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TranscriptFormat::from_path(Path::new("a.yml")), TranscriptFormat::Yaml);
        assert_eq!(TranscriptFormat::from_path(Path::new("a.JSON")), TranscriptFormat::Json);
        assert_eq!(TranscriptFormat::from_path(Path::new("noext")), TranscriptFormat::Json);
    }
}
