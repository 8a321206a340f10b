//! Error types for the golr-response library.
//!
//! Lookup misses (unknown document, absent field, unresolved label) are
//! reported as `None` by the accessors and never surface here. The only
//! error raised while reading a valid envelope is [`ResponseError::MalformedMap`].
//!
//! # Examples
//!
//! ```
//! use golr_response::envelope::ResponseEnvelope;
//! use golr_response::error::ResponseError;
//!
//! let response = ResponseEnvelope::new(
//!     r#"{"response": {"docs": [
//!         {"id": "a", "isa_partof": ["GO:1", "GO:2"], "isa_partof_map": "{\"GO:1\": "}
//!     ]}}"#,
//! );
//!
//! match response.label_for("a", "isa_partof", "GO:1") {
//!     Err(ResponseError::MalformedMap { field, .. }) => assert_eq!(field, "isa_partof_map"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// The main error type for golr-response operations.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// An auxiliary `_map` field was present but did not decode as an
    /// identifier to label mapping.
    #[error("Malformed map in field '{field}': {source}")]
    MalformedMap {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed as JSON but is not an object.
    #[error("Response is not well-formed: {0}")]
    NotWellFormed(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ResponseError.
pub type Result<T> = std::result::Result<T, ResponseError>;

impl ResponseError {
    /// Create a new malformed map error.
    pub fn malformed_map<S: Into<String>>(field: S, source: serde_json::Error) -> Self {
        ResponseError::MalformedMap {
            field: field.into(),
            source,
        }
    }

    /// Create a new not well-formed error.
    pub fn not_well_formed<S: Into<String>>(msg: S) -> Self {
        ResponseError::NotWellFormed(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ResponseError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ResponseError::Other(msg.into())
    }
}
