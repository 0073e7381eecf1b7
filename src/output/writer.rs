//! Output file writer implementation

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{CaptionError, CaptionResult};
use crate::output::{OutputConfig, OverwritePolicy};

/// Output file writer
///
/// Files are written to a temporary sibling and renamed into place, so a
/// reader never observes a half-written cue file.
pub struct OutputWriter;

impl OutputWriter {
    /// Create a new output writer
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter {
    /// Write `contents` to `config.path`, returning the number of bytes written
    pub fn write_output(&self, config: &OutputConfig, contents: &str) -> CaptionResult<u64> {
        let path = Path::new(&config.path);
        debug!("Writing output file: {}", path.display());

        self.check_overwrite_policy(path, config.overwrite)?;
        self.ensure_output_directory(path)?;
        self.write_atomic(path, contents.as_bytes())?;

        info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(contents.len() as u64)
    }

    /// Check overwrite policy against an existing file
    fn check_overwrite_policy(&self, path: &Path, policy: OverwritePolicy) -> CaptionResult<()> {
        if path.exists() {
            match policy {
                OverwritePolicy::Never => {
                    return Err(CaptionError::OutputError {
                        message: format!(
                            "{} exists and overwrite is disabled",
                            path.display()
                        ),
                    });
                }
                OverwritePolicy::Always => {
                    debug!("File exists, will overwrite: {}", path.display());
                }
            }
        }
        Ok(())
    }

    /// Ensure output directory exists
    fn ensure_output_directory(&self, path: &Path) -> CaptionResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CaptionError::OutputError {
                message: format!("Failed to create output directory {}: {}", parent.display(), e),
            })?;
        }
        Ok(())
    }

    /// Write file atomically using a temporary file in the target directory
    fn write_atomic(&self, path: &Path, data: &[u8]) -> CaptionResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(data)?;
        temp.flush()?;
        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| CaptionError::OutputError {
            message: format!("Failed to move temporary file to {}: {}", path.display(), e.error),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(path: &Path, overwrite: OverwritePolicy) -> OutputConfig {
        OutputConfig {
            path: path.to_string_lossy().to_string(),
            overwrite,
        }
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.ass");
        let bytes = OutputWriter::new()
            .write_output(&config(&path, OverwritePolicy::Always), "hello")
            .unwrap();
        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_overwrite_policies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.srt");
        std::fs::write(&path, "old").unwrap();

        let writer = OutputWriter::new();
        assert!(writer
            .write_output(&config(&path, OverwritePolicy::Never), "new")
            .is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");

        writer
            .write_output(&config(&path, OverwritePolicy::Always), "new")
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.ass");
        OutputWriter::new()
            .write_output(&config(&path, OverwritePolicy::Always), "")
            .unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
