use std::sync::Arc;

use crate::services::{
    providers::{CompletionProvider, MetadataProvider},
    MovieDnaService, PipelineSettings,
};

/// Shared application state
///
/// Holds no per-request data; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub dna_service: MovieDnaService,
}

impl AppState {
    /// Wires the pipeline around the given providers
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            dna_service: MovieDnaService::new(metadata, completion, settings),
        }
    }
}
