pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod search;
pub mod server;
pub mod snapshot;
pub mod store;
pub mod tracing;
pub mod types;

pub use catalog::{SnapshotCatalog, SnapshotEntry};
pub use config::Settings;
pub use error::{IndexError, Result};
pub use search::{MatchField, QueryEngine, SearchHit, SearchOutcome, SearchRequest};
pub use snapshot::Snapshot;
pub use store::IndexStore;
pub use types::{Category, DocumentRecord};
