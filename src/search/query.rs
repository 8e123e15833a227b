//! Substring search over a loaded snapshot.

use super::scoring::{MatchField, Suggestion, classify, suggest};
use crate::error::Result;
use crate::snapshot::{Snapshot, fold_case};
use crate::store::IndexStore;
use crate::types::{Category, DocumentRecord};
use serde::Serialize;
use std::sync::Arc;

/// Options for [`QueryEngine::search_with`].
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Case-insensitive substring to look for in titles and bodies.
    pub query: String,
    /// Only keep records of this category.
    pub category: Option<Category>,
    /// Maximum number of hits to return. `None` returns every match.
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A matching record together with why and where it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub record: DocumentRecord,
    /// Position of the record in load order.
    pub position: usize,
    pub field: MatchField,
}

/// Ranked hits plus bookkeeping for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    /// Number of matches before `limit` was applied.
    pub total: usize,
    /// Similar titles, only filled in when nothing matched.
    pub suggestions: Vec<Suggestion>,
}

/// Answers queries against whatever snapshot its store currently holds.
///
/// Matching is a case-insensitive substring test on `title` then `text`.
/// Title matches rank above text-only matches; within a tier records keep
/// their load order. The query is used as given, whitespace included; an
/// empty query matches nothing.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: Arc<IndexStore>,
}

impl QueryEngine {
    pub const fn new(store: Arc<IndexStore>) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    /// Returns matching records, best first.
    pub fn search(&self, query: &str) -> Result<Vec<DocumentRecord>> {
        let snapshot = self.store.snapshot()?;
        let records = snapshot.records();
        Ok(rank(&snapshot, query)
            .into_iter()
            .map(|(position, _)| records[position].clone())
            .collect())
    }

    /// Like [`search`](Self::search), with category filtering, a hit limit and
    /// suggestions for empty results.
    pub fn search_with(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let snapshot = self.store.snapshot()?;
        let records = snapshot.records();

        let matches: Vec<_> = rank(&snapshot, &request.query)
            .into_iter()
            .filter(|&(position, _)| {
                request
                    .category
                    .is_none_or(|category| records[position].category == category)
            })
            .collect();

        let total = matches.len();
        let limit = request.limit.unwrap_or(total);

        let hits = matches
            .into_iter()
            .take(limit)
            .map(|(position, field)| SearchHit {
                record: records[position].clone(),
                position,
                field,
            })
            .collect();

        let suggestions = if total == 0 {
            suggest(&request.query, records.iter().map(|r| r.title.as_str()))
        } else {
            vec![]
        };

        tracing::debug!(
            "Query '{}' matched {} of {} records",
            request.query,
            total,
            records.len()
        );

        Ok(SearchOutcome {
            hits,
            total,
            suggestions,
        })
    }
}

/// Positions of matching records in rank order.
fn rank(snapshot: &Snapshot, query: &str) -> Vec<(usize, MatchField)> {
    if query.is_empty() {
        return vec![];
    }
    let needle = fold_case(query);

    let mut matches: Vec<_> = snapshot
        .folded()
        .iter()
        .enumerate()
        .filter_map(|(position, fields)| classify(fields, &needle).map(|field| (position, field)))
        .collect();

    // Stable, so load order breaks ties.
    matches.sort_by_key(|&(_, field)| field);
    matches
}
