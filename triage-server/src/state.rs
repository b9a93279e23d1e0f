//! Shared application state for request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use triage_core::{Ranker, SharedCorpus};
use triage_tools::ToolRegistry;

/// Everything a handler needs: the corpus (for health reporting) and the
/// tool registry (for dispatch). Cloned per request; both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<SharedCorpus>,
    pub registry: Arc<ToolRegistry>,
}

impl AppState {
    /// Wire the registry around an already-loaded corpus.
    pub fn new(corpus: Arc<SharedCorpus>, ranker: Ranker, summary_dir: impl Into<PathBuf>) -> Self {
        let registry = Arc::new(ToolRegistry::new(corpus.clone(), ranker, summary_dir));
        Self { corpus, registry }
    }
}
