//! Error types for the spdxdb object store
//!
//! One variant per failure kind the core can signal. `verify()` never
//! returns any of these; it accumulates human-readable violations instead.
//! We use `thiserror` for automatic `Display` and `Error` implementations.

use crate::types::TypeTag;
use thiserror::Error;

/// Result type alias for spdxdb operations
pub type Result<T> = std::result::Result<T, SpdxError>;

/// Error types for the spdxdb object store
#[derive(Debug, Error)]
pub enum SpdxError {
    /// A reference's type tag has no registered model type
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// An individual URI matches neither a known enum constant nor the
    /// external-reference shape
    #[error("unresolvable URI: {0}")]
    UnresolvableUri(String),

    /// Attempt to write a reference across store/document boundaries
    #[error("incompatible context: {0}")]
    IncompatibleContext(String),

    /// Copy source or strict-bind target does not exist
    #[error("no object {id} in document {document}")]
    SourceMissing {
        /// Document URI the lookup was scoped to
        document: String,
        /// Identifier that was not found
        id: String,
    },

    /// Stored type at a location differs from the declared type
    #[error("type mismatch for {id}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Identifier at the mismatched location
        id: String,
        /// Type the caller declared
        expected: TypeTag,
        /// Type actually stored
        found: TypeTag,
    },

    /// Builder committed without a required field
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Identifier is syntactically invalid for its scheme
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Identifier already exists in its document
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),

    /// Value rejected by a property's declared kind or cardinality
    #[error("invalid value for property {property}: {message}")]
    InvalidValue {
        /// Property the value was destined for
        property: String,
        /// What was wrong with it
        message: String,
    },

    /// Serialization/deserialization error at the storage boundary
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend storage failure
    #[error("storage error: {0}")]
    Storage(String),
}

impl SpdxError {
    /// Construct a storage error from any displayable cause
    pub fn storage(msg: impl std::fmt::Display) -> Self {
        SpdxError::Storage(msg.to_string())
    }
}
