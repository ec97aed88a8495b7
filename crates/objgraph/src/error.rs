//! Error types for objgraph operations.
//!
//! Graph mutation and raw traversal are total and never fail. Errors come
//! from decoding identifier strings, from malformed link queries, and from
//! snapshot export.

use thiserror::Error;

/// Result type alias for objgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Top-level error type for all graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An identifier string could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A link query was composed incorrectly (e.g. group without kind)
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// Description of what went wrong
        message: String,
    },

    /// Serialization error while exporting a snapshot or loading config
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create an invalid-query error from a message.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}

/// Failure to decode an [`ObjectId`](crate::ObjectId) from its string form.
///
/// Every variant carries the full offending input. Decoding never falls
/// back to default field values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input was the empty string
    #[error("empty object id")]
    Empty,

    /// A comma-separated segment had no `=`
    #[error("malformed segment '{segment}' in object id '{input}'")]
    MalformedSegment {
        /// The offending segment
        segment: String,
        /// Full input
        input: String,
    },

    /// A segment used a field tag other than `G`, `K`, `NS` or `N`
    #[error("unknown key {field} in object id '{input}'")]
    UnknownField {
        /// The unrecognized tag
        field: String,
        /// Full input
        input: String,
    },

    /// A required field tag never appeared
    #[error("missing field {field} in object id '{input}'")]
    MissingField {
        /// The absent tag
        field: &'static str,
        /// Full input
        input: String,
    },

    /// A field tag appeared more than once
    #[error("duplicate field {field} in object id '{input}'")]
    DuplicateField {
        /// The repeated tag
        field: &'static str,
        /// Full input
        input: String,
    },

    /// Fields were present but not in `G,K,NS,N` order
    #[error("field {field} out of order in object id '{input}'")]
    OutOfOrder {
        /// The first tag found at the wrong position
        field: &'static str,
        /// Full input
        input: String,
    },

    /// The input ended in the middle of a backslash escape
    #[error("dangling escape at end of object id '{input}'")]
    DanglingEscape {
        /// Full input
        input: String,
    },

    /// A backslash escaped something other than `\`, `,` or `=`
    #[error("invalid escape '\\{escaped}' in object id '{input}'")]
    InvalidEscape {
        /// The character following the backslash
        escaped: char,
        /// Full input
        input: String,
    },
}

impl DecodeError {
    /// Whether this error is the unknown-field subtype.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }
}
