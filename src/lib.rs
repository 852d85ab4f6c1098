//! Document-scoped typed object store for SPDX-style SBOM metadata
//!
//! Three layers, re-exported here as one surface:
//! - `spdx-core`: identifiers, stored values and the [`ModelStore`]
//!   contract every backend implements
//! - `spdx-storage`: the map-backed [`InMemStore`] with JSON
//!   serialization
//! - `spdx-model`: typed model objects over any store, with schema
//!   validation, `verify()`, structural equivalence and cycle-safe deep
//!   copy across stores
//!
//! ```
//! use std::sync::Arc;
//! use spdxdb::{CopyManager, DocumentUri, InMemStore, ModelContext, SpdxDocument};
//!
//! # fn main() -> spdxdb::Result<()> {
//! let ctx = ModelContext::new(
//!     Arc::new(InMemStore::new()),
//!     DocumentUri::new("http://example.com/sbom/1"),
//!     CopyManager::new(),
//! );
//! let doc = SpdxDocument::create(&ctx)?;
//! doc.set_name("my sbom")?;
//! assert!(doc.verify().is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use spdx_core::error::{Result, SpdxError};
pub use spdx_core::traits::ModelStore;
pub use spdx_core::types::{DocumentUri, IdType, TypeTag};
pub use spdx_core::value::{SimpleUriValue, StoredValue, TypedValue};
pub use spdx_core::vocab;

pub use spdx_storage::InMemStore;

pub use spdx_model::{
    Annotation, AnnotationType, Checksum, ChecksumAlgorithm, CopyManager, CrossRef,
    CrossRefBuilder, EnumValue, ExternalDocumentRef, ExternalElement, ExtractedLicense,
    GenericElement, ListedLicense, ModelCollection, ModelContext, ModelObject, ModelValue,
    Relationship, RelationshipType, SpdxDocument, StoredKind, CURRENT_SPEC_VERSION, DOCUMENT_ID,
};

/// Test-harness conveniences
///
/// For tests and examples only; production callers wire their own store
/// and copy manager explicitly.
pub mod testing {
    use std::sync::Arc;

    use crate::{CopyManager, DocumentUri, InMemStore, ModelContext};

    /// A context over a fresh, private in-memory store
    ///
    /// Each call returns a fully isolated context; nothing is shared
    /// between calls, so there is no cross-test state to reset.
    pub fn fresh_context(document_uri: &str) -> ModelContext {
        ModelContext::new(
            Arc::new(InMemStore::new()),
            DocumentUri::new(document_uri),
            CopyManager::new(),
        )
    }
}
