//! Time parsing and formatting utilities

use crate::domain::model::TimeSpec;
use crate::error::{CaptionError, CaptionResult};

/// Time parser for command-line time arguments
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse seconds, MM:SS(.ms) or HH:MM:SS(.ms) to seconds
    pub fn parse_time(&self, time_str: &str) -> CaptionResult<f64> {
        TimeSpec::parse(time_str)
            .map(|spec| spec.seconds)
            .map_err(|_| CaptionError::InvalidTimeFormat {
                time: time_str.trim().to_string(),
            })
    }
}

/// Cue-file timestamp formatting
///
/// Every timestamp is quantised with round-half-away-from-zero at the
/// format's precision, so equal seconds always print equally in every cue.
pub struct TimeFormatter;

impl TimeFormatter {
    /// ASS timestamp `H:MM:SS.cc`
    pub fn ass(seconds: f64) -> String {
        let total_cs = Self::quantise(seconds, 100.0);
        let hours = total_cs / 360_000;
        let minutes = (total_cs % 360_000) / 6_000;
        let secs = (total_cs % 6_000) / 100;
        let centis = total_cs % 100;
        format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
    }

    /// SRT timestamp `HH:MM:SS,mmm`
    pub fn srt(seconds: f64) -> String {
        let total_ms = Self::quantise(seconds, 1000.0);
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        let millis = total_ms % 1000;
        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }

    /// Whole ticks at `ticks_per_second`; negative and non-finite input is 0
    pub fn quantise(seconds: f64, ticks_per_second: f64) -> u64 {
        let ticks = (seconds * ticks_per_second).round();
        if ticks.is_finite() && ticks > 0.0 {
            ticks as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_formats() {
        let parser = TimeParser::new();
        assert_eq!(parser.parse_time("12.5").unwrap(), 12.5);
        assert_eq!(parser.parse_time("1:30").unwrap(), 90.0);
        assert_eq!(parser.parse_time("1:00:01.5").unwrap(), 3601.5);
        assert!(matches!(
            parser.parse_time("abc"),
            Err(CaptionError::InvalidTimeFormat { .. })
        ));
    }

    #[test]
    fn test_ass_timestamps() {
        assert_eq!(TimeFormatter::ass(0.0), "0:00:00.00");
        assert_eq!(TimeFormatter::ass(1.65), "0:00:01.65");
        assert_eq!(TimeFormatter::ass(61.005), "0:01:01.01");
        assert_eq!(TimeFormatter::ass(3725.5), "1:02:05.50");
        assert_eq!(TimeFormatter::ass(-2.0), "0:00:00.00");
        assert_eq!(TimeFormatter::ass(f64::NAN), "0:00:00.00");
    }

    #[test]
    fn test_srt_timestamps() {
        assert_eq!(TimeFormatter::srt(0.0), "00:00:00,000");
        assert_eq!(TimeFormatter::srt(1.65), "00:00:01,650");
        assert_eq!(TimeFormatter::srt(3725.0005), "01:02:05,001");
    }

    #[test]
    fn test_ass_absorbs_float_noise() {
        assert_eq!(TimeFormatter::ass(0.1 + 0.2), "0:00:00.30");
        assert_eq!(TimeFormatter::ass(0.8 + 0.15), "0:00:00.95");
    }
}
