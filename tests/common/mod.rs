//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Tests that touch the filesystem get a fresh temporary documentation root
//! populated with copies of the snapshots in `tests/fixtures/`, so tests can
//! rewrite files without affecting each other.
//!
//! # Available Fixtures
//!
//! - `docs_root`: temp root holding every fixture snapshot
//! - `catalog`: a `SnapshotCatalog` discovered over `docs_root`

use docsearch::SnapshotCatalog;
use rstest::fixture;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Versions present under `tests/fixtures/`.
#[allow(dead_code)]
pub const FIXTURE_VERSIONS: &[&str] = &["dev", "latest", "release-0.1", "v0.1.0"];

/// Returns the directory holding the checked-in fixture snapshots.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Reads a fixture snapshot's raw source.
#[allow(dead_code)]
pub fn fixture_source(version: &str) -> String {
    let path = fixtures_dir().join(version).join("search_index.js");
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Copies a file from the real filesystem into this workspace.
    ///
    /// # Panics
    /// Panics if copying fails.
    pub fn copy_file(&self, source: &Path, dest_relative: &str) {
        let dest = self.root.join(dest_relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!(
                    "Failed to create parent directory for '{}': {}",
                    dest_relative, e
                )
            });
        }
        std::fs::copy(source, &dest).unwrap_or_else(|e| {
            panic!(
                "Failed to copy '{}' to '{}': {}",
                source.display(),
                dest.display(),
                e
            )
        });
    }
}

/// A temporary documentation root with every fixture snapshot copied in.
#[allow(dead_code)]
#[fixture]
pub fn docs_root() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    for version in FIXTURE_VERSIONS {
        workspace.copy_file(
            &fixtures_dir().join(version).join("search_index.js"),
            &format!("{}/search_index.js", version),
        );
    }
    workspace
}

/// A catalog over `docs_root`, returned with the workspace that owns the files.
#[allow(dead_code)]
#[fixture]
pub fn catalog(docs_root: TempWorkspace) -> (TempWorkspace, SnapshotCatalog) {
    let catalog = SnapshotCatalog::discover(docs_root.path(), NonZeroUsize::new(4).unwrap())
        .expect("Failed to discover fixture snapshots");
    (docs_root, catalog)
}
