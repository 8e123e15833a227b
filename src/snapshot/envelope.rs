//! Normalization of the `var name = {...}` wrapper that documentation
//! generators emit around the search index JSON.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Matches a leading JavaScript assignment, capturing the variable name.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)\s*=\s*")
        .expect("assignment pattern is valid")
});

/// Snapshot source with the JavaScript wrapper removed.
#[derive(Debug)]
pub(crate) struct Unwrapped<'a> {
    /// Variable the envelope was assigned to, if the source had a wrapper.
    pub(crate) binding: Option<String>,
    /// Standard JSON ready for `serde_json`.
    pub(crate) json: Cow<'a, str>,
}

/// Strips an optional assignment prefix, a trailing `;`, and trailing commas.
pub(crate) fn unwrap_source(source: &str) -> Unwrapped<'_> {
    let source = source.trim_start_matches('\u{feff}');

    let (binding, body) = match ASSIGNMENT.captures(source) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            (caps.get(1).map(|m| m.as_str().to_string()), &source[end..])
        }
        None => (None, source),
    };

    let body = body.trim_end().trim_end_matches(';').trim_end();

    Unwrapped {
        binding,
        json: strip_trailing_commas(body),
    }
}

/// Removes commas that follow a value and directly precede `]` or `}`
/// outside string literals.
///
/// Generated indexes end every entry with `},` including the last one, which
/// strict JSON rejects. A comma with no value before it (`[,]`, `[1,,]`) is
/// left alone so the JSON parser still rejects it.
pub(crate) fn strip_trailing_commas(json: &str) -> Cow<'_, str> {
    let bytes = json.as_bytes();
    let mut dangling = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    // Last non-whitespace byte outside a string; a closing quote counts.
    let mut previous: Option<u8> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
                previous = Some(b);
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b',' => {
                let follows_value = !matches!(previous, None | Some(b'[' | b'{' | b','));
                let next = bytes[i + 1..].iter().find(|c| !c.is_ascii_whitespace());
                if follows_value && matches!(next, Some(b']' | b'}')) {
                    dangling.push(i);
                }
            }
            _ => {}
        }

        if !b.is_ascii_whitespace() {
            previous = Some(b);
        }
    }

    if dangling.is_empty() {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len());
    let mut last = 0;
    for i in dangling {
        out.push_str(&json[last..i]);
        last = i + 1;
    }
    out.push_str(&json[last..]);
    Cow::Owned(out)
}
