//! Record types shared by the store, the query engine and the front ends.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of documentation anchor a record points at.
///
/// Snapshots disagree on capitalization (`"method"` vs `"Method"`), so
/// parsing is case-insensitive and the canonical form is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Page,
    Section,
    Type,
    Method,
    Function,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Page,
        Self::Section,
        Self::Type,
        Self::Method,
        Self::Function,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Type => "type",
            Self::Method => "method",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error for a category tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}', expected one of: page, section, type, method, function",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

/// One indexed documentation entry (page, section or symbol).
///
/// All five keys are required in the snapshot; `text` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// URL fragment of the anchor, unique per page within one snapshot.
    pub location: String,
    /// Human-readable page name.
    pub page: String,
    /// Symbol or section name.
    pub title: String,
    pub category: Category,
    /// Free-form documentation body.
    pub text: String,
}

impl DocumentRecord {
    /// First non-blank line of the body, trimmed.
    pub fn summary(&self) -> Option<&str> {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}
