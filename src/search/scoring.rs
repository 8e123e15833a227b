//! Match classification and "did you mean" suggestions.

use crate::snapshot::{FoldedFields, fold_case};
use ahash::AHashSet;
use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

/// Minimum Jaro-Winkler similarity for a title to be offered as a suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions attached to an empty result.
pub const MAX_SUGGESTIONS: usize = 5;

/// Field of a record that a query matched.
///
/// Ordering is rank order: title matches sort before text-only matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Text,
}

/// Classify a record against an already lowercased, non-empty needle.
pub(crate) fn classify(fields: &FoldedFields, needle: &str) -> Option<MatchField> {
    if fields.title.contains(needle) {
        Some(MatchField::Title)
    } else if fields.text.contains(needle) {
        Some(MatchField::Text)
    } else {
        None
    }
}

/// A near-miss candidate offered when a query matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub value: String,
    pub score: f64,
}

/// Rank `candidates` by similarity to `query`, best first.
///
/// Dotted names are also compared by their last segment, so `algn` can
/// suggest `JuliennedArrays.Align`. Duplicates are collapsed.
pub fn suggest<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<Suggestion> {
    let query = fold_case(query.trim());
    if query.is_empty() {
        return vec![];
    }

    let mut seen = AHashSet::new();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter(|candidate| seen.insert(*candidate))
        .filter_map(|candidate| {
            let lower = fold_case(candidate);
            let full = jaro_winkler::similarity(query.chars(), lower.chars());
            let tail = lower
                .rsplit('.')
                .next()
                .filter(|tail| tail.len() < lower.len())
                .map_or(0.0, |tail| jaro_winkler::similarity(query.chars(), tail.chars()));
            let score = full.max(tail);
            (score > SUGGESTION_THRESHOLD).then(|| Suggestion {
                value: candidate.to_string(),
                score,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
