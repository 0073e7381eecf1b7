//! Reelcap CLI
//!
//! Word-synchronised captions for vertical short-form video.
//!
//! # Usage
//!
//! ```bash
//! reelcap render --transcript talk.json --output talk.ass --title "Big news"
//! reelcap render --transcript talk.json --parts 3 --report report.json
//! reelcap frames --transcript talk.json --fps 60 --at 120
//! reelcap inspect --transcript talk.json --words-per-chunk 1
//! reelcap batch --dir transcripts/ --out-dir captions/ --format srt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use reelcap_cli::app::DefaultAppContainer;
use reelcap_cli::cli::{commands, Cli, Commands};
use reelcap_cli::config_initialization::initialize_settings;
use reelcap_cli::utils::logging::LoggingConfig;

/// Main entry point for the Reelcap CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    LoggingConfig::new(cli.log_level, cli.log_format).init();
    info!("Starting reelcap {}", env!("CARGO_PKG_VERSION"));

    let container = DefaultAppContainer::new().context("Failed to initialize application")?;
    let settings = initialize_settings(&container, &cli).await?;
    let overwrite = cli.overwrite;

    // Execute the requested command
    match cli.command {
        Commands::Render(args) => {
            info!("Executing render command");
            commands::render(&container, settings, args, overwrite).await?;
        }
        Commands::Frames(args) => {
            info!("Executing frames command");
            commands::frames(&container, settings, args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, settings, args).await?;
        }
        Commands::Batch(args) => {
            info!("Executing batch command");
            commands::batch(&container, settings, args, overwrite).await?;
        }
    }

    info!("reelcap completed successfully");
    Ok(())
}
