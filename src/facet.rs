//! Facet counts reported alongside the main result set.
//!
//! The engine encodes each facet field as a flat list alternating value and
//! count (`["biological_process", 120, "molecular_function", 80]`), already
//! ranked by count.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::scalar_to_string;

/// Facet field to value to document count.
pub type FacetCounts = AHashMap<String, AHashMap<String, u64>>;

/// A facet value and the number of documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    /// The facet value.
    pub value: String,
    /// Number of documents matching this value.
    pub count: u64,
}

impl FacetValue {
    /// Create a new facet value.
    pub fn new<S: Into<String>>(value: S, count: u64) -> Self {
        FacetValue {
            value: value.into(),
            count,
        }
    }
}

/// Reads a response's `facet_counts.facet_fields` section.
#[derive(Debug, Clone, Copy)]
pub struct FacetAggregator<'r> {
    fields: Option<&'r Map<String, Value>>,
}

impl<'r> FacetAggregator<'r> {
    /// Create an aggregator over a (possibly absent) `facet_fields` object.
    pub fn new(fields: Option<&'r Map<String, Value>>) -> Self {
        FacetAggregator { fields }
    }

    /// Facet field names, sorted.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Value/count pairs of one facet field, in engine order.
    ///
    /// Returns `None` for unknown fields. Malformed pairs are skipped.
    pub fn values(&self, field: &str) -> Option<Vec<FacetValue>> {
        let flat = self.fields?.get(field)?.as_array()?;
        Some(
            flat.chunks_exact(2)
                .filter_map(|pair| {
                    let value = scalar_to_string(&pair[0])?;
                    let count = pair[1].as_u64()?;
                    Some(FacetValue { value, count })
                })
                .collect(),
        )
    }

    /// All facet fields flattened into maps; a repeated value keeps its last count.
    pub fn counts(&self) -> FacetCounts {
        let mut counts = FacetCounts::default();
        for field in self.field_names() {
            let values = self.values(&field).unwrap_or_default();
            let per_field = counts.entry(field).or_default();
            for FacetValue { value, count } in values {
                per_field.insert(value, count);
            }
        }
        counts
    }
}
