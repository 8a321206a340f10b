//! Documents of a response and the keys used to look them up.
//!
//! A [`Document`] is the raw JSON object the engine returned for one hit.
//! Field values are scalars, arrays of scalars, or (for the `_map`,
//! `_closure_map` and `_list_map` variants) JSON-encoded strings.
//!
//! # Examples
//!
//! ```
//! use golr_response::document::DocumentKey;
//!
//! assert_eq!(DocumentKey::from(2usize).as_position(), Some(2));
//! assert_eq!(DocumentKey::from("2").as_position(), Some(2));
//! assert_eq!(DocumentKey::from("GO:0008150").as_position(), None);
//! ```

pub mod index;

use std::fmt;

use serde_json::{Map, Value};

pub use index::DocumentIndex;

/// A single result document.
pub type Document = Map<String, Value>;

/// A key naming a document, either by position or by identifier.
///
/// Identifier keys that spell a canonical non-negative integer are also
/// candidate positions, and position lookup is always tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey<'a> {
    /// Zero-based position in the document list.
    Position(usize),
    /// Value of the identifier field.
    Id(&'a str),
}

impl<'a> DocumentKey<'a> {
    /// The positional reading of this key, if it has one.
    pub fn as_position(&self) -> Option<usize> {
        match *self {
            DocumentKey::Position(position) => Some(position),
            DocumentKey::Id(id) => parse_canonical_position(id),
        }
    }
}

impl From<usize> for DocumentKey<'_> {
    fn from(position: usize) -> Self {
        DocumentKey::Position(position)
    }
}

impl<'a> From<&'a str> for DocumentKey<'a> {
    fn from(id: &'a str) -> Self {
        DocumentKey::Id(id)
    }
}

impl<'a> From<&'a String> for DocumentKey<'a> {
    fn from(id: &'a String) -> Self {
        DocumentKey::Id(id.as_str())
    }
}

impl fmt::Display for DocumentKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKey::Position(position) => write!(f, "{}", position),
            DocumentKey::Id(id) => f.write_str(id),
        }
    }
}

// "01" and "+1" are identifiers, not positions.
fn parse_canonical_position(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

/// Render a scalar field value as the string form the engine keys on.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
