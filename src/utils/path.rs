//! Output path derivation

use std::path::{Path, PathBuf};

use crate::error::{CaptionError, CaptionResult};

/// Transcript file extensions picked up by batch mode
pub const TRANSCRIPT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Path utilities for cue-file outputs
pub struct PathUtils;

impl PathUtils {
    /// Get file extension from path, lowercased
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Get file stem (name without extension) from path
    pub fn get_stem(path: &Path) -> CaptionResult<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| CaptionError::OutputError {
                message: format!("Cannot derive a file name from '{}'", path.display()),
            })
    }

    /// Whether batch mode should treat `path` as a transcript
    pub fn is_transcript(path: &Path) -> bool {
        Self::get_extension(path)
            .map(|ext| TRANSCRIPT_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// `<dir>/<stem>.<ext>` next to the transcript, or inside `out_dir` when given
    pub fn default_output(transcript: &Path, out_dir: Option<&Path>, ext: &str) -> CaptionResult<PathBuf> {
        let stem = Self::get_stem(transcript)?;
        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => transcript.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Ok(dir.join(format!("{}.{}", stem, ext)))
    }

    /// `<stem>_partN.<ext>` beside `base`
    pub fn part_output(base: &Path, number: u32) -> CaptionResult<PathBuf> {
        let stem = Self::get_stem(base)?;
        let file_name = match base.extension() {
            Some(ext) => format!("{}_part{}.{}", stem, number, ext.to_string_lossy()),
            None => format!("{}_part{}", stem, number),
        };
        Ok(base.with_file_name(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_next_to_transcript() {
        let out = PathUtils::default_output(Path::new("clips/talk.json"), None, "ass").unwrap();
        assert_eq!(out, PathBuf::from("clips/talk.ass"));

        let out = PathUtils::default_output(Path::new("talk.yaml"), Some(Path::new("out")), "srt").unwrap();
        assert_eq!(out, PathBuf::from("out/talk.srt"));
    }

    #[test]
    fn test_part_output_names() {
        let out = PathUtils::part_output(Path::new("out/talk.ass"), 3).unwrap();
        assert_eq!(out, PathBuf::from("out/talk_part3.ass"));
        let out = PathUtils::part_output(Path::new("talk"), 1).unwrap();
        assert_eq!(out, PathBuf::from("talk_part1"));
    }

    #[test]
    fn test_transcript_detection() {
        assert!(PathUtils::is_transcript(Path::new("a.JSON")));
        assert!(PathUtils::is_transcript(Path::new("a.yml")));
        assert!(!PathUtils::is_transcript(Path::new("a.ass")));
        assert!(!PathUtils::is_transcript(Path::new("README")));
    }

    #[test]
    fn test_stem_of_root_is_error() {
        assert!(PathUtils::get_stem(Path::new("/")).is_err());
    }
}
