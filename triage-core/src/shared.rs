//! Shared, atomically reloadable corpus handle.
//!
//! The corpus is loaded once at startup and read by every request. Reload,
//! when used, is a distinct serialized operation: the replacement corpus is
//! built completely off-lock and published with a single pointer swap, so
//! readers observe either the old or the new corpus, never a partial one.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::corpus::Corpus;
use crate::error::Result;

/// A process-wide handle to the current [`Corpus`].
///
/// Cheap to share (`Arc<SharedCorpus>`); any number of concurrent readers
/// may call [`get`](SharedCorpus::get) without coordination.
#[derive(Debug)]
pub struct SharedCorpus {
    current: RwLock<Arc<Corpus>>,
    // Serializes reloads: at most one replacement corpus in flight.
    reload_gate: Mutex<()>,
}

impl SharedCorpus {
    /// Wrap an already-loaded corpus.
    pub fn new(corpus: Corpus) -> Self {
        Self { current: RwLock::new(Arc::new(corpus)), reload_gate: Mutex::new(()) }
    }

    /// Load the corpus from `path` and wrap it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Corpus::load(path)?))
    }

    /// Snapshot the current corpus.
    ///
    /// The returned `Arc` stays valid for the caller's whole request even if
    /// a reload publishes a replacement in the meantime.
    pub async fn get(&self) -> Arc<Corpus> {
        self.current.read().await.clone()
    }

    /// Atomically replace the current corpus.
    pub async fn replace(&self, corpus: Corpus) {
        let fresh = Arc::new(corpus);
        *self.current.write().await = fresh;
        info!("corpus replaced");
    }

    /// Reload the corpus from `path` and publish it atomically.
    ///
    /// Loads fully before touching the shared state; a failed load leaves
    /// the current corpus in place and visible to readers throughout.
    ///
    /// # Errors
    ///
    /// Propagates any [`TriageError`](crate::TriageError) from the load.
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<()> {
        let _gate = self.reload_gate.lock().await;
        let fresh = Corpus::load(path)?;
        self.replace(fresh).await;
        Ok(())
    }
}
