//! CLI module for Reelcap
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

use crate::output::OverwritePolicy;
use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

pub use args::{BatchArgs, FramesArgs, InspectArgs, RenderArgs, StyleArgs, WindowArgs};

/// Reelcap caption engine
///
/// Turns word-level transcripts into word-synchronised captions, both as a
/// cue file for burn-in and as a frame timeline for an animated overlay.
#[derive(Parser, Debug)]
#[command(name = "reelcap")]
#[command(about = "Reelcap - Word-synchronised captions for short-form video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, or YAML by extension)
    #[arg(long, global = true, env = "REELCAP_CONFIG")]
    pub config: Option<String>,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Overwrite behavior for existing output files
    #[arg(long, value_enum, default_value_t = OverwritePolicy::Always, global = true)]
    pub overwrite: OverwritePolicy,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a transcript into a cue file
    Render(RenderArgs),
    /// Print the frame timeline, or the frame props at one frame
    Frames(FramesArgs),
    /// Show chunk boundaries and auto-fit scales
    Inspect(InspectArgs),
    /// Render every transcript under a directory
    Batch(BatchArgs),
}

impl Commands {
    /// Style flags of the selected command
    pub fn style(&self) -> &StyleArgs {
        match self {
            Commands::Render(args) => &args.style,
            Commands::Frames(args) => &args.style,
            Commands::Inspect(args) => &args.style,
            Commands::Batch(args) => &args.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "reelcap",
            "--overwrite",
            "never",
            "render",
            "-t",
            "talk.json",
            "--parts",
            "3",
            "--highlight-color",
            "Cyan",
        ])
        .unwrap();
        assert_eq!(cli.overwrite, OverwritePolicy::Never);
        assert_eq!(cli.log_level, LogLevel::Warn);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.transcript, "talk.json");
                assert_eq!(args.parts, Some(3));
                assert_eq!(args.style.highlight_color.as_deref(), Some("Cyan"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_split_flags_conflict() {
        let result = Cli::try_parse_from([
            "reelcap",
            "render",
            "-t",
            "talk.json",
            "--parts",
            "2",
            "--split-seconds",
            "30",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_flags_are_bounded() {
        let parse = |flag: &str, value: &str| {
            Cli::try_parse_from(["reelcap", "render", "-t", "talk.json", flag, value])
        };
        assert!(parse("--parts", "4000000000").is_err());
        assert!(parse("--parts", "1000").is_err());
        assert!(parse("--parts", "0").is_err());
        assert!(parse("--parts", "999").is_ok());
        assert!(parse("--split-seconds", "1e-9").is_err());
        assert!(parse("--split-seconds", "NaN").is_err());
        assert!(parse("--split-seconds", "1.5").is_ok());
    }

    #[test]
    fn test_window_needs_both_ends() {
        assert!(Cli::try_parse_from(["reelcap", "inspect", "-t", "a.json", "--start", "5"]).is_err());
    }
}
