//! Common utilities and helpers

pub mod logging;
pub mod path;
pub mod time;

/// Utility functions for Reelcap
pub struct Utils;

impl Utils {
    /// Format a duration in seconds for display
    pub fn format_seconds(seconds: f64) -> String {
        crate::domain::model::TimeSpec::from_seconds(seconds).format_hms()
    }

    /// Format file size for display
    pub fn format_file_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
