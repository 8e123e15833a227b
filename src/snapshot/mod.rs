//! Parsed search index snapshots.
//!
//! A snapshot is one versioned capture of a documentation search index. It is
//! parsed once and never mutated; newer data replaces the whole snapshot.

mod envelope;

use crate::error::{IndexError, Result};
use crate::types::DocumentRecord;
use ahash::AHashSet;
use serde::Deserialize;
use std::time::Instant;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Deserialize)]
struct Envelope {
    docs: Vec<DocumentRecord>,
}

/// Lowercased copies of the searchable fields, computed once per load.
#[derive(Debug, Clone)]
pub(crate) struct FoldedFields {
    pub(crate) title: String,
    pub(crate) text: String,
}

/// An immutable, ordered collection of documentation records.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: Option<String>,
    binding: Option<String>,
    digest: u64,
    records: Vec<DocumentRecord>,
    folded: Vec<FoldedFields>,
}

impl Snapshot {
    /// Parses a serialized snapshot.
    ///
    /// Accepts standard JSON of the form `{"docs": [...]}`, optionally wrapped
    /// in a JavaScript assignment and with trailing commas. Every record must
    /// carry `location`, `page`, `title`, `category` and `text`, and no two
    /// records may share a `(location, page)` pair.
    pub fn parse(source: &str) -> Result<Self> {
        let start = Instant::now();
        let digest = xxh3_64(source.as_bytes());

        let unwrapped = envelope::unwrap_source(source);
        let Envelope { docs } = serde_json::from_str(&unwrapped.json)?;

        ensure_unique_keys(&docs)?;

        let folded = docs
            .iter()
            .map(|record| FoldedFields {
                title: fold_case(&record.title),
                text: fold_case(&record.text),
            })
            .collect();

        tracing::debug!(
            "Parsed snapshot: {} records, digest {:016x}, in {:?}",
            docs.len(),
            digest,
            start.elapsed()
        );

        Ok(Self {
            version: None,
            binding: unwrapped.binding,
            digest,
            records: docs,
            folded,
        })
    }

    /// Labels this snapshot with a documentation version (e.g. `dev`).
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// JavaScript variable the index was assigned to, if any.
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// xxh3 digest of the raw source bytes.
    pub const fn digest(&self) -> u64 {
        self.digest
    }

    /// Records in load order.
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub const fn len(&self) -> usize {
        self.records.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn folded(&self) -> &[FoldedFields] {
        &self.folded
    }
}

/// Lowercases one character at a time, so a character folds the same way
/// wherever it appears in a word.
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn ensure_unique_keys(records: &[DocumentRecord]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if !seen.insert((record.location.as_str(), record.page.as_str())) {
            return Err(IndexError::parse(format!(
                "duplicate record at position {}: location '{}' on page '{}'",
                position, record.location, record.page
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use assert2::{check, let_assert};
    use rstest::rstest;

    const WRAPPED: &str = r##"var documenterSearchIndex = {"docs": [

{
    "location": "#",
    "page": "JuliennedArrays.jl",
    "title": "JuliennedArrays.jl",
    "category": "page",
    "text": ""
},

{
    "location": "#JuliennedArrays.False",
    "page": "JuliennedArrays.jl",
    "title": "JuliennedArrays.False",
    "category": "Type",
    "text": "struct False\n\n\n\n\n\n"
},

]}
"##;

    #[test]
    fn test_parse_wrapped_snapshot() {
        let_assert!(Ok(snapshot) = Snapshot::parse(WRAPPED));
        check!(snapshot.len() == 2);
        check!(snapshot.binding() == Some("documenterSearchIndex"));
        check!(snapshot.version().is_none());
        check!(snapshot.records()[0].category == Category::Page);
        check!(snapshot.records()[1].category == Category::Type);
        check!(snapshot.folded()[1].title == "juliennedarrays.false");
    }

    #[test]
    fn test_parse_plain_json() {
        let source = r#"{"docs": [{"location": "a", "page": "p", "title": "T",
            "category": "section", "text": "body"}]}"#;
        let_assert!(Ok(snapshot) = Snapshot::parse(source));
        check!(snapshot.binding().is_none());
        check!(snapshot.records()[0].text == "body");
    }

    #[test]
    fn test_parse_empty_docs() {
        let_assert!(Ok(snapshot) = Snapshot::parse(r#"{"docs": []}"#));
        check!(snapshot.is_empty());
    }

    #[rstest]
    #[case::missing_title(r#"{"docs": [{"location": "a", "page": "p", "category": "page", "text": ""}]}"#)]
    #[case::missing_text(r#"{"docs": [{"location": "a", "page": "p", "title": "t", "category": "page"}]}"#)]
    #[case::wrong_type(r#"{"docs": [{"location": 1, "page": "p", "title": "t", "category": "page", "text": ""}]}"#)]
    #[case::unknown_category(r#"{"docs": [{"location": "a", "page": "p", "title": "t", "category": "macro", "text": ""}]}"#)]
    #[case::missing_envelope(r#"[{"location": "a", "page": "p", "title": "t", "category": "page", "text": ""}]"#)]
    #[case::truncated(r#"var documenterSearchIndex = {"docs": ["#)]
    #[case::empty("")]
    #[case::lone_comma(r#"{"docs": [ , ]}"#)]
    #[case::double_comma(r#"{"docs": [{"location": "a", "page": "p", "title": "t", "category": "page", "text": ""},, ]}"#)]
    fn test_parse_rejects_malformed(#[case] source: &str) {
        let_assert!(Err(error) = Snapshot::parse(source));
        check!(error.is_parse());
    }

    #[test]
    fn test_duplicate_location_and_page_rejected() {
        let source = r##"{"docs": [
            {"location": "#x", "page": "Home", "title": "A", "category": "page", "text": ""},
            {"location": "#x", "page": "Home", "title": "B", "category": "page", "text": ""}
        ]}"##;
        let_assert!(Err(IndexError::Parse { reason }) = Snapshot::parse(source));
        check!(reason.contains("duplicate"));
    }

    #[test]
    fn test_same_location_on_other_page_allowed() {
        let source = r##"{"docs": [
            {"location": "#x", "page": "Home", "title": "A", "category": "page", "text": ""},
            {"location": "#x", "page": "API", "title": "B", "category": "page", "text": ""}
        ]}"##;
        check!(Snapshot::parse(source).is_ok());
    }

    #[test]
    fn test_digest_is_stable() {
        let_assert!(Ok(first) = Snapshot::parse(WRAPPED));
        let_assert!(Ok(second) = Snapshot::parse(WRAPPED));
        check!(first.digest() == second.digest());

        let_assert!(Ok(other) = Snapshot::parse(r#"{"docs": []}"#));
        check!(first.digest() != other.digest());
    }

    #[test]
    fn test_with_version() {
        let_assert!(Ok(snapshot) = Snapshot::parse(WRAPPED));
        let snapshot = snapshot.with_version("dev");
        check!(snapshot.version() == Some("dev"));
    }
}
