//! Load-once holder for the current search index snapshot.

use crate::error::{IndexError, Result};
use crate::snapshot::Snapshot;
use crate::types::DocumentRecord;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

/// Holds the currently loaded [`Snapshot`].
///
/// The store starts unloaded. A successful load installs a new snapshot as a
/// whole; readers clone the `Arc` and never observe a partially replaced
/// collection. A failed load leaves the previous snapshot in place.
#[derive(Debug, Default)]
pub struct IndexStore {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl IndexStore {
    /// Create an empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    /// Parse `source` and install it as the current snapshot.
    pub fn load(&self, source: &str) -> Result<Arc<Snapshot>> {
        let start = Instant::now();
        let snapshot = Snapshot::parse(source).inspect_err(|e| {
            tracing::warn!("Rejected search index snapshot: {}", e);
        })?;

        let snapshot = self.install(snapshot);
        tracing::info!(
            "Loaded search index: {} records in {:?}",
            snapshot.len(),
            start.elapsed()
        );
        Ok(snapshot)
    }

    /// Read a snapshot file and install it as the current snapshot.
    pub async fn load_path(&self, path: impl AsRef<Path>) -> Result<Arc<Snapshot>> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IndexError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Read {} bytes from {}", source.len(), path.display());
        self.load(&source)
    }

    /// Replace the current snapshot with an already parsed one.
    pub fn install(&self, snapshot: impl Into<Arc<Snapshot>>) -> Arc<Snapshot> {
        let snapshot = snapshot.into();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(IndexError::NotLoaded)
    }

    /// All records of the current snapshot, in load order.
    pub fn all(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.snapshot()?.records().to_vec())
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
