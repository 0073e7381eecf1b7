// TOML config adapter - Layered caption settings from file and environment

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "reelcap.toml";

/// Environment variables and the settings they override
pub const ENV_OVERRIDES: &[&str] = &[
    "REELCAP_FONT",
    "REELCAP_HIGHLIGHT_COLOR",
    "REELCAP_BACKGROUND",
    "REELCAP_UPPERCASE",
    "REELCAP_WORDS_PER_CHUNK",
    "REELCAP_ANIMATION",
    "REELCAP_FPS",
    "REELCAP_FORMAT",
    "REELCAP_LAYOUT",
];

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// TOML configuration adapter
///
/// Files may also be YAML (`.yaml`/`.yml`). A file only needs the keys it
/// changes; everything else keeps its default.
pub struct TomlConfigAdapter {
    default_path: PathBuf,
    env: EnvLookup,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new config adapter reading the process environment
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self::with_env(DEFAULT_CONFIG_FILE, |key| std::env::var(key).ok()))
    }

    /// Create a config adapter with a custom default path and environment
    pub fn with_env<F>(default_path: impl Into<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            default_path: default_path.into(),
            env: Box::new(env),
            config_file_path: RwLock::new(None),
        }
    }

    /// Decode a settings file, filling unspecified keys from the defaults
    pub fn parse_settings(content: &str, yaml: bool) -> Result<CaptionSettings, DomainError> {
        let overlay: Value = if yaml {
            serde_yaml::from_str(content)
                .map_err(|e| DomainError::ConfigFail(format!("Failed to parse YAML config: {}", e)))?
        } else {
            toml::from_str(content)
                .map_err(|e| DomainError::ConfigFail(format!("Failed to parse TOML config: {}", e)))?
        };

        let mut merged = serde_json::to_value(CaptionSettings::default())
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        if !overlay.is_null() {
            merge_values(&mut merged, overlay);
        }
        serde_json::from_value(merged)
            .map_err(|e| DomainError::ConfigFail(format!("Invalid settings: {}", e)))
    }

    /// Apply `REELCAP_*` overrides
    pub fn apply_env(&self, settings: &mut CaptionSettings) -> Result<usize, DomainError> {
        let mut applied = 0;
        for &key in ENV_OVERRIDES {
            let Some(value) = (self.env)(key) else {
                continue;
            };
            debug!("Environment override: {} = {}", key, value);
            apply_override(settings, key, &value)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn is_yaml(path: &Path) -> bool {
        matches!(
            path.extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .as_deref(),
            Some("yaml") | Some("yml")
        )
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn load_settings(&self, file_path: Option<&str>) -> Result<CaptionSettings, DomainError> {
        let path = match file_path {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                if !path.is_file() {
                    return Err(DomainError::ConfigFail(format!(
                        "Config file does not exist: {}",
                        explicit
                    )));
                }
                Some(path)
            }
            None => Some(self.default_path.clone()).filter(|p| p.is_file()),
        };

        let mut settings = match &path {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    DomainError::ConfigFail(format!("Failed to read config file: {}", e))
                })?;
                Self::parse_settings(&content, Self::is_yaml(path))?
            }
            None => {
                debug!("No config file found, using defaults");
                CaptionSettings::default()
            }
        };
        *self.config_file_path.write().await = path;

        let applied = self.apply_env(&mut settings)?;
        if applied > 0 {
            info!("Applied {} environment variable overrides", applied);
        }
        settings.validate()?;
        Ok(settings)
    }

    async fn get_config_file_path(&self) -> Option<String> {
        self.config_file_path
            .read()
            .await
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }
}

fn apply_override(settings: &mut CaptionSettings, key: &str, value: &str) -> Result<(), DomainError> {
    let style = &mut settings.style;
    match key {
        "REELCAP_FONT" => style.font = value.trim().to_string(),
        "REELCAP_HIGHLIGHT_COLOR" => style.highlight_color = HighlightColor::parse_or_default(value),
        "REELCAP_BACKGROUND" => style.background_style = BackgroundStyle::parse_or_default(value),
        "REELCAP_WORDS_PER_CHUNK" => style.words_per_chunk = WordsPerChunk::parse_or_default(value),
        "REELCAP_ANIMATION" => style.animation = AnimationStyle::parse_or_default(value),
        "REELCAP_UPPERCASE" => match parse_bool(value) {
            Some(flag) => style.force_uppercase = flag,
            None => warn!("Ignoring {}={}: expected true or false", key, value),
        },
        "REELCAP_FPS" => {
            settings.fps = value.trim().parse().map_err(|_| {
                DomainError::ConfigFail(format!("{} must be an integer, got '{}'", key, value))
            })?
        }
        "REELCAP_FORMAT" => settings.format = CueFormat::parse(value)?,
        "REELCAP_LAYOUT" => settings.layout = CueLayout::parse(value)?,
        _ => {}
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
