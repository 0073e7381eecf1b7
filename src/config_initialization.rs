//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::AppContainer;
use crate::cli::{Cli, Commands, StyleArgs};
use crate::domain::model::*;
use crate::utils::path::PathUtils;

/// Resolve settings following precedence: CLI > Env > File > Defaults
pub async fn initialize_settings(container: &dyn AppContainer, cli: &Cli) -> Result<CaptionSettings> {
    info!("Initializing configuration hierarchy");

    // Defaults, config file and environment are layered by the config port
    let config_port = container.config_port();
    let mut settings = config_port
        .load_settings(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    if let Some(path) = config_port.get_config_file_path().await {
        debug!("Configuration file: {}", path);
    }

    let cli_overrides = apply_cli_overrides(&mut settings, &cli.command)?;
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

/// Apply command-line flags on top of loaded settings, returning how many were set
pub fn apply_cli_overrides(settings: &mut CaptionSettings, command: &Commands) -> Result<usize> {
    let mut overrides = apply_style_overrides(settings, command.style());

    let (format, layout) = match command {
        Commands::Render(args) => {
            if let Some(title) = &args.title {
                settings.title.text = Some(title.clone());
                overrides += 1;
            }
            if let Some(label) = &args.part_label {
                settings.part.text = Some(label.clone());
                overrides += 1;
            }
            let inferred = args.output.as_deref().and_then(format_from_output);
            (args.format.clone().or(inferred), args.layout.as_deref())
        }
        Commands::Batch(args) => (args.format.clone(), args.layout.as_deref()),
        Commands::Frames(_) | Commands::Inspect(_) => (None, None),
    };

    if let Some(format) = format {
        settings.format = CueFormat::parse(&format).context("Invalid --format")?;
        overrides += 1;
    }
    if let Some(layout) = layout {
        settings.layout = CueLayout::parse(layout).context("Invalid --layout")?;
        overrides += 1;
    }
    Ok(overrides)
}

fn apply_style_overrides(settings: &mut CaptionSettings, args: &StyleArgs) -> usize {
    let style = &mut settings.style;
    let mut overrides = 0;

    if let Some(font) = &args.font {
        style.font = font.clone();
        overrides += 1;
    }
    if let Some(color) = &args.highlight_color {
        style.highlight_color = HighlightColor::parse_or_default(color);
        overrides += 1;
    }
    if let Some(background) = &args.background {
        style.background_style = BackgroundStyle::parse_or_default(background);
        overrides += 1;
    }
    if let Some(uppercase) = args.uppercase {
        style.force_uppercase = uppercase;
        overrides += 1;
    }
    if let Some(words) = &args.words_per_chunk {
        style.words_per_chunk = WordsPerChunk::parse_or_default(words);
        overrides += 1;
    }
    if let Some(animation) = &args.animation {
        style.animation = AnimationStyle::parse_or_default(animation);
        overrides += 1;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
        overrides += 1;
    }
    if let Some(full_words) = args.full_words {
        settings.full_words = full_words;
        overrides += 1;
    }
    overrides
}

/// Cue format implied by an output file extension, if it names one
fn format_from_output(output: &str) -> Option<String> {
    PathUtils::get_extension(Path::new(output)).filter(|ext| ext == "ass" || ext == "srt")
}
