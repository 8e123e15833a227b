//! Discovery and lazy loading of versioned snapshots under a documentation root.
//!
//! A documentation root holds one directory per version (`dev`, `latest`,
//! release tags), each with a `search_index.js`. Parsed snapshots are kept in
//! an LRU cache and reloaded when their file changes on disk.

use crate::error::{IndexError, Result};
use crate::search::{QueryEngine, suggest};
use crate::snapshot::Snapshot;
use crate::store::IndexStore;
use ignore::WalkBuilder;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use xxhash_rust::xxh3::xxh3_64;

/// File name of a snapshot inside its version directory.
pub const INDEX_FILE_NAME: &str = "search_index.js";

/// Version aliases preferred as the default, in order.
const PREFERRED_DEFAULTS: &[&str] = &["latest", "stable", "dev"];

/// A snapshot file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub version: String,
    pub path: PathBuf,
}

struct CachedStore {
    store: Arc<IndexStore>,
    modified: Option<SystemTime>,
}

/// Set of snapshots available under one documentation root.
pub struct SnapshotCatalog {
    root: PathBuf,
    entries: Vec<SnapshotEntry>,
    default_version: Option<String>,
    cache: Mutex<LruCache<String, CachedStore>>,
}

impl std::fmt::Debug for SnapshotCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCatalog")
            .field("root", &self.root)
            .field("versions", &self.entries.len())
            .field("default_version", &self.default_version)
            .finish_non_exhaustive()
    }
}

impl SnapshotCatalog {
    /// Scan `root` for `<version>/search_index.js` files.
    ///
    /// An empty root is not an error; every lookup will then fail with
    /// [`IndexError::UnknownSnapshot`].
    pub fn discover(root: impl AsRef<Path>, cache_size: NonZeroUsize) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(IndexError::Io {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "documentation root is not a directory",
                ),
            });
        }

        let mut entries: Vec<SnapshotEntry> = WalkBuilder::new(root)
            .standard_filters(false)
            .max_depth(Some(2))
            .build()
            .filter_map(|e| e.ok())
            .filter(|e| e.depth() == 2 && e.file_name() == INDEX_FILE_NAME)
            .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
            .filter_map(|e| {
                let version = e.path().parent()?.file_name()?.to_str()?.to_string();
                Some(SnapshotEntry {
                    version,
                    path: e.into_path(),
                })
            })
            .collect();

        entries.sort_by(|a, b| version_order(&a.version).cmp(&version_order(&b.version)));

        tracing::info!(
            "Discovered {} snapshot(s) under {}: {}",
            entries.len(),
            root.display(),
            entries
                .iter()
                .map(|e| e.version.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            default_version: None,
            cache: Mutex::new(LruCache::new(cache_size)),
        })
    }

    /// Override the version used when callers do not name one.
    #[must_use]
    pub fn with_default_version(mut self, version: Option<String>) -> Self {
        self.default_version = version;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.version.as_str())
    }

    pub fn entry(&self, version: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.version == version)
    }

    /// The configured default if set, else `latest`, `stable` or `dev`,
    /// else the first discovered version.
    pub fn default_version(&self) -> Option<&str> {
        if let Some(version) = &self.default_version {
            return Some(version);
        }
        PREFERRED_DEFAULTS
            .iter()
            .copied()
            .find(|alias| self.entry(alias).is_some())
            .or_else(|| self.entries.first().map(|e| e.version.as_str()))
    }

    /// Resolve an optional version name against the default.
    pub fn resolve<'a>(&'a self, version: Option<&'a str>) -> Result<&'a SnapshotEntry> {
        let Some(version) = version.or_else(|| self.default_version()) else {
            return Err(self.unknown("(default)"));
        };
        self.entry(version).ok_or_else(|| self.unknown(version))
    }

    /// Load (or fetch from cache) the store for a version.
    ///
    /// The cache lock is not held while a snapshot file is read or parsed.
    pub async fn store(&self, version: Option<&str>) -> Result<Arc<IndexStore>> {
        let entry = self.resolve(version)?;
        let modified = modified_time(&entry.path).await;

        let cached = {
            let mut cache = self.cache.lock().await;
            match cache.get(&entry.version) {
                Some(cached) if cached.modified == modified => {
                    tracing::debug!("Cache hit for snapshot '{}'", entry.version);
                    return Ok(Arc::clone(&cached.store));
                }
                Some(cached) => Some(Arc::clone(&cached.store)),
                None => None,
            }
        };

        let source = read_source(&entry.path).await?;
        let store = match cached {
            Some(store) => {
                let unchanged = store
                    .snapshot()
                    .is_ok_and(|current| current.digest() == xxh3_64(source.as_bytes()));
                if unchanged {
                    tracing::debug!("Snapshot '{}' touched but unchanged", entry.version);
                } else {
                    tracing::info!("Snapshot '{}' changed on disk, reloading", entry.version);
                    let snapshot = Snapshot::parse(&source)?.with_version(&entry.version);
                    store.install(snapshot);
                }
                store
            }
            None => {
                let snapshot = Snapshot::parse(&source)?.with_version(&entry.version);
                tracing::info!(
                    "Loaded snapshot '{}' ({} records) from {}",
                    entry.version,
                    snapshot.len(),
                    entry.path.display()
                );
                Arc::new(IndexStore::with_snapshot(snapshot))
            }
        };

        let mut cache = self.cache.lock().await;
        // Another caller may have loaded the same version meanwhile; keep the
        // store already handed out so engines stay bound to it.
        if let Some(existing) = cache.get_mut(&entry.version) {
            if !Arc::ptr_eq(&existing.store, &store) {
                existing.store.install(store.snapshot()?);
            }
            existing.modified = modified;
            return Ok(Arc::clone(&existing.store));
        }
        cache.put(
            entry.version.clone(),
            CachedStore {
                store: Arc::clone(&store),
                modified,
            },
        );
        Ok(store)
    }

    /// Query engine bound to a version's store.
    pub async fn engine(&self, version: Option<&str>) -> Result<QueryEngine> {
        Ok(QueryEngine::new(self.store(version).await?))
    }

    pub async fn is_cached(&self, version: &str) -> bool {
        self.cache.lock().await.contains(version)
    }

    fn unknown(&self, version: &str) -> IndexError {
        IndexError::UnknownSnapshot {
            version: version.to_string(),
            suggestions: suggest(version, self.versions())
                .into_iter()
                .map(|s| s.value)
                .collect(),
        }
    }
}

/// Sort key: well-known aliases first, then tags alphabetically.
fn version_order(version: &str) -> (usize, &str) {
    let rank = ["dev", "latest", "stable"]
        .iter()
        .position(|alias| *alias == version)
        .unwrap_or(3);
    (rank, version)
}

async fn modified_time(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|m| m.modified().ok())
}

async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })
}
