//! Label resolution for identifier-valued fields.
//!
//! For a field `f` the engine may ship any of:
//!
//! - `f_label`: a label string, or a list of labels parallel to `f`
//! - `f_map`, `f_closure_map`, `f_list_map`: JSON-encoded strings holding an
//!   identifier to label object
//!
//! [`LabelResolver`] probes these in a fixed order and returns the first
//! label found. Decoded maps are cached per (document position, map field)
//! and reused for every later lookup against the same document.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde_json::Value;

use crate::document::Document;
use crate::error::{ResponseError, Result};

/// Suffix of the field holding direct labels.
pub const LABEL_SUFFIX: &str = "_label";

/// Suffixes of the encoded map fields, in probing order.
pub const LABEL_MAP_SUFFIXES: [&str; 3] = ["_map", "_closure_map", "_list_map"];

/// A decoded identifier to label map.
pub type LabelMap = AHashMap<String, String>;

type CacheKey = (usize, String);

/// Resolves human-readable labels and caches decoded label maps.
#[derive(Debug, Default)]
pub struct LabelResolver {
    cache: RwLock<AHashMap<CacheKey, Arc<LabelMap>>>,
}

impl LabelResolver {
    /// Create a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decoded maps currently cached.
    pub fn cached_maps(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether the map in `map_field` of the document at `position` has been decoded.
    pub fn is_cached(&self, position: usize, map_field: &str) -> bool {
        self.cache
            .read()
            .contains_key(&(position, map_field.to_string()))
    }

    /// Resolve the label of `item_id` within `field` of a document.
    ///
    /// `position` identifies the document for caching purposes. Returns
    /// `Ok(None)` when the document lacks `field` or nothing resolves the
    /// item; fails only when an encoded map is present but malformed.
    pub fn label_for(
        &self,
        position: usize,
        doc: &Document,
        field: &str,
        item_id: &str,
    ) -> Result<Option<String>> {
        let Some(raw) = doc.get(field) else {
            return Ok(None);
        };

        match doc.get(&format!("{field}{LABEL_SUFFIX}")) {
            Some(Value::String(label)) => return Ok(Some(label.clone())),
            Some(Value::Array(labels)) => {
                let single_item = raw.as_array().is_some_and(|items| items.len() == 1);
                if labels.len() == 1 && single_item {
                    if let Some(label) = labels[0].as_str() {
                        return Ok(Some(label.to_string()));
                    }
                }
            }
            _ => {}
        }

        for suffix in LABEL_MAP_SUFFIXES {
            let map_field = format!("{field}{suffix}");
            let Some(map) = self.label_map(position, doc, &map_field)? else {
                continue;
            };
            if let Some(label) = map.get(item_id) {
                return Ok(Some(label.clone()));
            }
        }

        Ok(None)
    }

    /// Fetch the decoded map for `map_field`, decoding it on first use.
    fn label_map(
        &self,
        position: usize,
        doc: &Document,
        map_field: &str,
    ) -> Result<Option<Arc<LabelMap>>> {
        let Some(encoded) = doc.get(map_field).filter(|value| !value.is_null()) else {
            return Ok(None);
        };

        let key = (position, map_field.to_string());
        if let Some(map) = self.cache.read().get(&key) {
            return Ok(Some(Arc::clone(map)));
        }

        // Upgradable readers exclude each other, so a map is decoded once.
        let cache = self.cache.upgradable_read();
        if let Some(map) = cache.get(&key) {
            return Ok(Some(Arc::clone(map)));
        }
        let map = Arc::new(decode_label_map(map_field, encoded)?);
        debug!(
            "Decoded {} with {} entries for document {}",
            map_field,
            map.len(),
            position
        );
        let mut cache = RwLockUpgradableReadGuard::upgrade(cache);
        cache.insert(key, Arc::clone(&map));
        Ok(Some(map))
    }
}

/// Decode an encoded label map field.
///
/// The engine ships these as JSON-encoded strings; an inline object is
/// accepted as-is. Anything else is malformed.
pub fn decode_label_map(map_field: &str, encoded: &Value) -> Result<LabelMap> {
    let decoded = match encoded {
        Value::String(text) => serde_json::from_str(text),
        other => serde_json::from_value(other.clone()),
    };
    decoded.map_err(|e| ResponseError::malformed_map(map_field, e))
}
