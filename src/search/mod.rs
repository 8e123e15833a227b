//! Query engine over loaded search index snapshots.
//!
//! Matching is a plain case-insensitive substring scan; ranking only
//! distinguishes title hits from body hits.

pub(crate) mod query;
pub(crate) mod scoring;

pub use query::{QueryEngine, SearchHit, SearchOutcome, SearchRequest};
pub use scoring::{MatchField, Suggestion, suggest};
