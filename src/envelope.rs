//! The search response envelope.
//!
//! [`ResponseEnvelope`] wraps one immutable response tree and answers
//! questions about it: is it well-formed and complete, what was asked, which
//! page was returned, and what do its documents, labels, highlights, filters
//! and facets say. All caches live on the envelope and are filled from reads
//! of the tree, which is never mutated.
//!
//! # Examples
//!
//! ```
//! use golr_response::envelope::ResponseEnvelope;
//!
//! let response = ResponseEnvelope::new(
//!     r#"{
//!         "responseHeader": {"status": 0, "params": {"q": "*:*", "fq": "-source:MGI"}},
//!         "response": {"numFound": 1, "start": 0, "maxScore": 1.0, "docs": [
//!             {"id": "GO:0008150", "annotation_class": "GO:0008150",
//!              "annotation_class_label": "biological_process"}
//!         ]},
//!         "facet_counts": {"facet_fields": {"source": ["ZFIN", 1]}}
//!     }"#,
//! );
//!
//! assert!(response.is_successful());
//! assert!(response.get_document("GO:0008150").is_some());
//! let label = response.label_for(0usize, "annotation_class", "GO:0008150").unwrap();
//! assert_eq!(label.as_deref(), Some("biological_process"));
//! assert!(!response.decode_filters()["source"]["MGI"]);
//! ```

use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::config::EnvelopeConfig;
use crate::document::{Document, DocumentIndex, DocumentKey, scalar_to_string};
use crate::error::Result;
use crate::facet::{FacetAggregator, FacetCounts, FacetValue};
use crate::filter::{FilterClause, FilterDecoder, FilterMap};
use crate::highlight::HighlightMatcher;
use crate::json::JsonEnvelope;
use crate::label::LabelResolver;

/// A faceted-search response and its lazily built lookup caches.
#[derive(Debug)]
pub struct ResponseEnvelope {
    json: JsonEnvelope,
    config: EnvelopeConfig,
    successful: OnceLock<bool>,
    index: DocumentIndex,
    labels: LabelResolver,
}

impl ResponseEnvelope {
    /// Interpret a raw payload with the default configuration.
    ///
    /// Never fails; an unparsable payload yields an envelope that is not
    /// well-formed.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, EnvelopeConfig::default())
    }

    /// Interpret a raw payload with an explicit configuration.
    pub fn with_config(text: &str, config: EnvelopeConfig) -> Self {
        Self::from_json(JsonEnvelope::parse(text), config)
    }

    /// Interpret an already parsed tree.
    pub fn from_value(value: Value) -> Self {
        Self::from_value_with_config(value, EnvelopeConfig::default())
    }

    /// Interpret an already parsed tree with an explicit configuration.
    pub fn from_value_with_config(value: Value, config: EnvelopeConfig) -> Self {
        Self::from_json(JsonEnvelope::from_value(value), config)
    }

    /// Interpret a raw payload, failing unless it is a JSON object.
    pub fn parse_strict(text: &str) -> Result<Self> {
        Ok(Self::from_json(
            JsonEnvelope::parse_strict(text)?,
            EnvelopeConfig::default(),
        ))
    }

    fn from_json(json: JsonEnvelope, config: EnvelopeConfig) -> Self {
        let index = DocumentIndex::new(config.id_field.clone());
        ResponseEnvelope {
            json,
            config,
            successful: OnceLock::new(),
            index,
            labels: LabelResolver::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// The whole backing tree.
    pub fn raw(&self) -> &Value {
        self.json.raw()
    }

    /// True iff the payload parsed as a JSON object.
    pub fn is_well_formed(&self) -> bool {
        self.json.is_well_formed()
    }

    /// True iff every section a complete response carries is present.
    ///
    /// Requires `responseHeader.status == 0`, `responseHeader.params`,
    /// `response.numFound`, `response.start`, `response.maxScore`,
    /// `response.docs` and `facet_counts.facet_fields`. Computed once.
    pub fn is_successful(&self) -> bool {
        *self.successful.get_or_init(|| {
            let json = &self.json;
            let present = |keys: &[&str]| json.path(keys).is_some_and(|v| !v.is_null());
            let defined = |keys: &[&str]| json.path(keys).is_some();

            json.path(&["responseHeader", "status"])
                .and_then(Value::as_i64)
                == Some(0)
                && present(&["responseHeader", "params"])
                && defined(&["response", "numFound"])
                && defined(&["response", "start"])
                && defined(&["response", "maxScore"])
                && present(&["response", "docs"])
                && present(&["facet_counts", "facet_fields"])
        })
    }

    // Query parameters

    /// All query parameters echoed by the engine.
    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.json
            .path(&["responseHeader", "params"])
            .and_then(Value::as_object)
    }

    /// A raw query parameter (a string or a list of strings).
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters()?.get(key)
    }

    /// The `q` parameter.
    pub fn query(&self) -> Option<&str> {
        self.parameter("q").and_then(Value::as_str)
    }

    /// The `rows` parameter.
    pub fn rows(&self) -> Option<u64> {
        self.parameter("rows").and_then(as_count)
    }

    /// The `packet` parameter, a client-side request sequence number.
    pub fn packet(&self) -> Option<u64> {
        self.parameter("packet").and_then(as_count)
    }

    /// The `callback_type` parameter.
    pub fn callback_type(&self) -> Option<&str> {
        self.parameter("callback_type").and_then(Value::as_str)
    }

    // Result metadata and paging

    /// Total number of matching documents (`numFound`).
    pub fn total_documents(&self) -> u64 {
        self.json
            .path(&["response", "numFound"])
            .and_then(as_count)
            .unwrap_or(0)
    }

    /// Zero-based offset of the first returned document.
    pub fn start(&self) -> u64 {
        self.json
            .path(&["response", "start"])
            .and_then(as_count)
            .unwrap_or(0)
    }

    /// Highest relevance score, if reported.
    pub fn max_score(&self) -> Option<f64> {
        self.json
            .path(&["response", "maxScore"])
            .and_then(Value::as_f64)
    }

    /// The returned documents, in engine order.
    pub fn documents(&self) -> &[Value] {
        self.json
            .path(&["response", "docs"])
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of returned documents.
    pub fn document_count(&self) -> usize {
        self.documents().len()
    }

    /// One-based number of the first returned document.
    pub fn start_document(&self) -> u64 {
        self.start().saturating_add(1)
    }

    /// One-based number of the last returned document.
    pub fn end_document(&self) -> u64 {
        self.start_document()
            .saturating_add(self.document_count() as u64)
            .saturating_sub(1)
    }

    /// Whether the full result set exceeds one page.
    pub fn paging_possible(&self) -> bool {
        let rows = self.rows().unwrap_or(self.config.default_rows);
        self.total_documents() > rows
    }

    /// Whether a previous page exists.
    pub fn can_page_back(&self) -> bool {
        self.start_document() > 1
    }

    /// Whether a next page exists.
    pub fn can_page_forward(&self) -> bool {
        self.total_documents() > self.end_document()
    }

    // Documents

    /// Look up a document by position or identifier.
    ///
    /// Position lookup takes precedence: an identifier that spells a valid
    /// position resolves to the document at that position.
    pub fn get_document<'k, K: Into<DocumentKey<'k>>>(&self, key: K) -> Option<&Document> {
        self.index.get(self.documents(), key.into())
    }

    /// A raw field value of a document.
    pub fn document_field<'k, K: Into<DocumentKey<'k>>>(
        &self,
        key: K,
        field: &str,
    ) -> Option<&Value> {
        self.get_document(key)?.get(field)
    }

    /// Whether the identifier index has been built.
    pub fn is_indexed(&self) -> bool {
        self.index.is_built()
    }

    /// Resolve the human-readable label of `item_id` in `field` of a document.
    ///
    /// Returns `Ok(None)` when the document or field is missing or nothing
    /// resolves the item. Fails only on a malformed encoded label map.
    pub fn label_for<'k, K: Into<DocumentKey<'k>>>(
        &self,
        key: K,
        field: &str,
        item_id: &str,
    ) -> Result<Option<String>> {
        let Some((position, doc)) = self.index.resolve(self.documents(), key.into()) else {
            return Ok(None);
        };
        self.labels.label_for(position, doc, field, item_id)
    }

    /// Number of label maps decoded so far.
    pub fn cached_label_maps(&self) -> usize {
        self.labels.cached_maps()
    }

    /// The highlighted fragment of `field` whose text is `raw_item`.
    pub fn highlight_for<'k, K: Into<DocumentKey<'k>>>(
        &self,
        key: K,
        field: &str,
        raw_item: &str,
    ) -> Option<&str> {
        let key = key.into();
        let highlighting = self.json.path(&["highlighting"]).and_then(Value::as_object);
        HighlightMatcher::new(highlighting).highlight_for(
            &key.to_string(),
            || {
                self.get_document(key)?
                    .get(&self.config.id_field)
                    .and_then(scalar_to_string)
            },
            field,
            raw_item,
        )
    }

    // Filters

    /// The filter constraints in parameter order.
    pub fn filter_clauses(&self) -> Vec<FilterClause> {
        FilterDecoder::new(self.parameter(&self.config.filter_param)).clauses()
    }

    /// The filter constraints as field to value to polarity.
    pub fn decode_filters(&self) -> FilterMap {
        FilterDecoder::new(self.parameter(&self.config.filter_param)).decode()
    }

    // Facets

    fn facets(&self) -> FacetAggregator<'_> {
        FacetAggregator::new(
            self.json
                .path(&["facet_counts", "facet_fields"])
                .and_then(Value::as_object),
        )
    }

    /// Facet field names, sorted.
    pub fn facet_fields(&self) -> Vec<String> {
        self.facets().field_names()
    }

    /// Value/count pairs of a facet field, in engine order.
    pub fn facet_values(&self, field: &str) -> Option<Vec<FacetValue>> {
        self.facets().values(field)
    }

    /// All facet counts as field to value to count.
    pub fn facet_counts(&self) -> FacetCounts {
        self.facets().counts()
    }
}

/// Read a non-negative integer sent either as a number or a numeric string.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
