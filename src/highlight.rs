//! Matching engine-supplied highlight fragments back to raw field values.
//!
//! The highlighting section maps a document identifier to an object of
//! field variants, each holding a list of HTML fragments. A fragment matches
//! a raw value when its text with all `<...>` tags removed is exactly that
//! value.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Field-name suffixes probed for highlight fragments, in order.
pub const HIGHLIGHT_SUFFIXES: [&str; 4] = ["_label_searchable", "_label", "_searchable", ""];

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// Remove every `<...>` span from a fragment.
pub fn strip_tags(fragment: &str) -> Cow<'_, str> {
    TAG_PATTERN.replace_all(fragment, "")
}

/// Looks up highlight fragments in a response's highlighting section.
#[derive(Debug, Clone, Copy)]
pub struct HighlightMatcher<'r> {
    highlighting: Option<&'r Map<String, Value>>,
}

impl<'r> HighlightMatcher<'r> {
    /// Create a matcher over a (possibly absent) highlighting section.
    pub fn new(highlighting: Option<&'r Map<String, Value>>) -> Self {
        HighlightMatcher { highlighting }
    }

    /// Find the highlight entry for a document.
    ///
    /// `key` is tried as a highlighting key first; otherwise `resolve_id`
    /// supplies the identifier of the document the key denotes.
    pub fn entry<F>(&self, key: &str, resolve_id: F) -> Option<&'r Map<String, Value>>
    where
        F: FnOnce() -> Option<String>,
    {
        let highlighting = self.highlighting?;
        if let Some(entry) = highlighting.get(key) {
            return entry.as_object();
        }
        let id = resolve_id()?;
        highlighting.get(&id)?.as_object()
    }

    /// Find the fragment for `raw_item` inside an entry's `field`.
    ///
    /// Only the first present field variant is consulted. The original
    /// fragment, tags included, is returned for the first match.
    pub fn fragment_in(
        entry: &'r Map<String, Value>,
        field: &str,
        raw_item: &str,
    ) -> Option<&'r str> {
        let fragments = HIGHLIGHT_SUFFIXES
            .iter()
            .find_map(|suffix| entry.get(&format!("{field}{suffix}")))?;

        match fragments {
            Value::Array(fragments) => fragments
                .iter()
                .filter_map(Value::as_str)
                .find(|fragment| strip_tags(fragment) == raw_item),
            Value::String(fragment) if strip_tags(fragment) == raw_item => {
                Some(fragment.as_str())
            }
            _ => None,
        }
    }

    /// Entry lookup followed by fragment matching.
    pub fn highlight_for<F>(
        &self,
        key: &str,
        resolve_id: F,
        field: &str,
        raw_item: &str,
    ) -> Option<&'r str>
    where
        F: FnOnce() -> Option<String>,
    {
        let entry = self.entry(key, resolve_id)?;
        Self::fragment_in(entry, field, raw_item)
    }
}
