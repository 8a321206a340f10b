//! Configuration for interpreting a response envelope.

use serde::{Deserialize, Serialize};

/// Rows per page the engine uses when the request did not say.
pub const DEFAULT_ROWS: u64 = 10;

/// Configuration for a [`ResponseEnvelope`](crate::envelope::ResponseEnvelope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Document field holding the canonical identifier.
    pub id_field: String,
    /// Query parameter carrying the filter queries.
    pub filter_param: String,
    /// Page size assumed when the `rows` parameter is absent.
    pub default_rows: u64,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        EnvelopeConfig {
            id_field: "id".to_string(),
            filter_param: "fq".to_string(),
            default_rows: DEFAULT_ROWS,
        }
    }
}

impl EnvelopeConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier field.
    pub fn id_field<S: Into<String>>(mut self, id_field: S) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Set the filter query parameter name.
    pub fn filter_param<S: Into<String>>(mut self, filter_param: S) -> Self {
        self.filter_param = filter_param.into();
        self
    }

    /// Set the fallback page size.
    pub fn default_rows(mut self, default_rows: u64) -> Self {
        self.default_rows = default_rows;
        self
    }
}
