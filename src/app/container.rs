use std::sync::Arc;

use crate::adapters::{FsArtifactAdapter, FsTranscriptAdapter, TomlConfigAdapter};
use crate::app::{
    batch_interactor::BatchInteractor, inspect_interactor::InspectInteractor,
    render_interactor::RenderInteractor,
};
use crate::domain::errors::DomainError;
use crate::ports::{ArtifactPort, ConfigPort, TranscriptPort};

pub trait AppContainer: Send + Sync {
    fn config_port(&self) -> Arc<dyn ConfigPort>;
    fn render_interactor(&self) -> Arc<RenderInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
}

pub struct DefaultAppContainer {
    config_port: Arc<dyn ConfigPort>,
    render_interactor: Arc<RenderInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    batch_interactor: Arc<BatchInteractor>,
}

impl DefaultAppContainer {
    pub fn new() -> Result<Self, DomainError> {
        let transcript_port = Arc::new(FsTranscriptAdapter::new()?);
        let artifact_port = Arc::new(FsArtifactAdapter::new()?);
        let config_port = Arc::new(TomlConfigAdapter::new()?);

        let render_interactor = Arc::new(RenderInteractor::new(
            Arc::clone(&transcript_port) as Arc<dyn TranscriptPort>,
            Arc::clone(&artifact_port) as Arc<dyn ArtifactPort>,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&transcript_port) as Arc<dyn TranscriptPort>,
        ));

        let batch_interactor = Arc::new(BatchInteractor::new(
            Arc::clone(&transcript_port) as Arc<dyn TranscriptPort>,
            Arc::clone(&render_interactor),
        ));

        Ok(Self {
            config_port: config_port as Arc<dyn ConfigPort>,
            render_interactor,
            inspect_interactor,
            batch_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn config_port(&self) -> Arc<dyn ConfigPort> {
        Arc::clone(&self.config_port)
    }

    fn render_interactor(&self) -> Arc<RenderInteractor> {
        Arc::clone(&self.render_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }
}
