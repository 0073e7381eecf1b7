// Adapters - External system implementations

pub mod fs_artifact;
pub mod fs_transcript;
pub mod toml_config;

// Re-export adapters
pub use fs_artifact::FsArtifactAdapter;
pub use fs_transcript::FsTranscriptAdapter;
pub use toml_config::TomlConfigAdapter;
