//! Plain-text rendering of search results and snapshot listings.

use crate::catalog::SnapshotCatalog;
use crate::search::{MatchField, SearchOutcome};
use std::fmt::Write as _;

/// Format search results into a readable string output.
pub fn format_search_results(outcome: &SearchOutcome, query: &str, version: &str) -> String {
    if outcome.hits.is_empty() {
        return format_no_results(outcome, query, version);
    }

    let mut output = format!("Search results for '{}' in '{}':\n\n", query, version);

    for (idx, hit) in outcome.hits.iter().enumerate() {
        let record = &hit.record;
        let matched = match hit.field {
            MatchField::Title => "title",
            MatchField::Text => "text",
        };
        let _ = writeln!(
            output,
            "{}. `{}` ({}) - {} › {} [matched {}]",
            idx + 1,
            record.title,
            record.category,
            record.page,
            record.location,
            matched
        );

        if let Some(summary) = record.summary() {
            let _ = writeln!(output, "   {}", summary);
        }

        output.push('\n');
    }

    if outcome.total > outcome.hits.len() {
        let _ = writeln!(
            output,
            "Showing {} of {} matches. Raise the limit to see more.",
            outcome.hits.len(),
            outcome.total
        );
    }

    output
}

fn format_no_results(outcome: &SearchOutcome, query: &str, version: &str) -> String {
    let mut msg = format!("No results found for '{}' in '{}'.\n\n", query, version);

    if !outcome.suggestions.is_empty() {
        msg.push_str("Did you mean:\n");
        for suggestion in &outcome.suggestions {
            let _ = writeln!(msg, "• `{}`", suggestion.value);
        }
        msg.push('\n');
    }

    msg.push_str("Search tips:\n");
    msg.push_str("• Matching is a case-insensitive substring test on titles and text\n");
    msg.push_str("• Try a shorter fragment, e.g. 'align' instead of 'JuliennedArrays.align'\n");
    msg.push_str("• Drop the category filter if one was given\n");

    msg
}

/// List the snapshots of a catalog, marking the default and cached ones.
pub async fn format_snapshot_list(catalog: &SnapshotCatalog) -> String {
    if catalog.entries().is_empty() {
        return format!(
            "No snapshots found under {}.\n\nExpected layout: <root>/<version>/search_index.js\n",
            catalog.root().display()
        );
    }

    let default = catalog.default_version();
    let mut output = format!("Snapshots under {}:\n\n", catalog.root().display());

    for entry in catalog.entries() {
        let mut markers = vec![];
        if default == Some(entry.version.as_str()) {
            markers.push("default");
        }
        if catalog.is_cached(&entry.version).await {
            markers.push("loaded");
        }

        let _ = write!(output, "• {}", entry.version);
        if !markers.is_empty() {
            let _ = write!(output, " ({})", markers.join(", "));
        }
        let _ = writeln!(output, " - {}", entry.path.display());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchHit, Suggestion};
    use crate::types::{Category, DocumentRecord};
    use assert2::check;

    fn hit(title: &str, field: MatchField) -> SearchHit {
        SearchHit {
            record: DocumentRecord {
                location: format!("#{}", title),
                page: "Home".to_string(),
                title: title.to_string(),
                category: Category::Method,
                text: "\n\ncombine(pieces)\n\nCombine many pieces of an array.".to_string(),
            },
            position: 0,
            field,
        }
    }

    #[test]
    fn test_results_list_title_and_summary() {
        let outcome = SearchOutcome {
            hits: vec![hit("JuliennedArrays.combine", MatchField::Title)],
            total: 3,
            suggestions: vec![],
        };
        let output = format_search_results(&outcome, "combine", "latest");
        check!(output.contains("1. `JuliennedArrays.combine` (method)"));
        check!(output.contains("   combine(pieces)"));
        check!(output.contains("Showing 1 of 3 matches"));
    }

    #[test]
    fn test_no_results_lists_suggestions() {
        let outcome = SearchOutcome {
            hits: vec![],
            total: 0,
            suggestions: vec![Suggestion {
                value: "JuliennedArrays.Align".to_string(),
                score: 0.93,
            }],
        };
        let output = format_search_results(&outcome, "Algn", "dev");
        check!(output.starts_with("No results found for 'Algn' in 'dev'."));
        check!(output.contains("• `JuliennedArrays.Align`"));
    }
}
