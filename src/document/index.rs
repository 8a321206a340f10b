//! Position and identifier lookup over the document list.
//!
//! Positional access needs no index. The identifier index is a pair of maps
//! (`id -> position`, `position -> id`) built together in a single scan the
//! first time an identifier lookup misses positional access, and never
//! rebuilt afterwards.

use std::sync::OnceLock;

use ahash::AHashMap;
use log::debug;
use serde_json::Value;

use crate::document::{Document, DocumentKey, scalar_to_string};

/// Bidirectional maps between identifiers and positions.
#[derive(Debug, Default)]
struct IdMaps {
    by_id: AHashMap<String, usize>,
    by_position: AHashMap<usize, String>,
}

impl IdMaps {
    fn build(docs: &[Value], id_field: &str) -> Self {
        let mut maps = IdMaps::default();
        for (position, doc) in docs.iter().enumerate() {
            let Some(id) = doc.get(id_field).and_then(scalar_to_string) else {
                continue;
            };
            maps.by_position.insert(position, id.clone());
            maps.by_id.insert(id, position);
        }
        maps
    }
}

/// Lazily built lookup over a document list.
///
/// The index does not own the documents; callers pass the same immutable
/// slice on every call.
#[derive(Debug)]
pub struct DocumentIndex {
    id_field: String,
    maps: OnceLock<IdMaps>,
}

impl DocumentIndex {
    /// Create an empty, unbuilt index keyed on `id_field`.
    pub fn new<S: Into<String>>(id_field: S) -> Self {
        DocumentIndex {
            id_field: id_field.into(),
            maps: OnceLock::new(),
        }
    }

    /// The identifier field this index reads.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Whether the identifier maps have been built.
    pub fn is_built(&self) -> bool {
        self.maps.get().is_some()
    }

    fn maps(&self, docs: &[Value]) -> &IdMaps {
        self.maps.get_or_init(|| {
            let maps = IdMaps::build(docs, &self.id_field);
            debug!(
                "Built document index over {} documents ({} identifiers)",
                docs.len(),
                maps.by_id.len()
            );
            maps
        })
    }

    /// Resolve a key to its position and document.
    ///
    /// A key with a valid positional reading always resolves positionally,
    /// even when some document's identifier spells the same number. Otherwise
    /// the key's string form is looked up as an identifier.
    pub fn resolve<'d>(
        &self,
        docs: &'d [Value],
        key: DocumentKey<'_>,
    ) -> Option<(usize, &'d Document)> {
        if let Some(position) = key.as_position() {
            if let Some(doc) = docs.get(position) {
                return doc.as_object().map(|doc| (position, doc));
            }
        }

        let position = match key {
            DocumentKey::Id(id) => self.position_of(docs, id)?,
            DocumentKey::Position(position) => {
                self.position_of(docs, &position.to_string())?
            }
        };
        docs.get(position)?.as_object().map(|doc| (position, doc))
    }

    /// Look up a document by key.
    pub fn get<'d>(&self, docs: &'d [Value], key: DocumentKey<'_>) -> Option<&'d Document> {
        self.resolve(docs, key).map(|(_, doc)| doc)
    }

    /// Position of the document carrying `id`.
    pub fn position_of(&self, docs: &[Value], id: &str) -> Option<usize> {
        self.maps(docs).by_id.get(id).copied()
    }

    /// Identifier of the document at `position`.
    pub fn identifier_at<'s>(&'s self, docs: &[Value], position: usize) -> Option<&'s str> {
        self.maps(docs).by_position.get(&position).map(String::as_str)
    }
}
