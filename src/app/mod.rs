// Application layer - Use case interactors

pub mod batch_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod render_interactor;

// Re-export interactors
pub use batch_interactor::{BatchFailure, BatchInteractor, BatchResponse};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{ChunkSummary, InspectInteractor, InspectResponse};
pub use render_interactor::{RenderInteractor, RenderReport, RenderResponse};
