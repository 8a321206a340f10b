//! # golr-response
//!
//! A read-only interpretive layer over a single JSON response returned by a
//! faceted-search engine (Solr-style envelope).
//!
//! ## Features
//!
//! - Structural validation of the response envelope
//! - Paging and query metadata accessors
//! - Document lookup by position or identifier
//! - Label resolution through embedded `_label` / `_map` fields
//! - Highlight fragment matching
//! - Filter-query (`fq`) decoding
//! - Facet count aggregation

pub mod config;
pub mod document;
pub mod envelope;
pub mod error;
pub mod facet;
pub mod filter;
pub mod highlight;
pub mod json;
pub mod label;

pub mod prelude {
    pub use crate::config::EnvelopeConfig;
    pub use crate::document::{Document, DocumentKey};
    pub use crate::envelope::ResponseEnvelope;
    pub use crate::error::{ResponseError, Result};
    pub use crate::facet::FacetValue;
    pub use crate::filter::{FilterClause, FilterMap};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
