//! Typed model layer for spdxdb
//!
//! Sits between strongly-typed model objects and the abstract store
//! contract:
//! - [`ModelContext`]: explicit (store, document, copy manager) binding
//!   threaded through every constructor
//! - [`ModelObject`]: the typed projection over a store location with
//!   schema-validated accessors, `verify()` and `equivalent()`
//! - `convert`: bidirectional mapping between stored and model values
//! - [`CopyManager`]: cycle-safe deep copy across stores and documents
//! - concrete types: annotations, checksums, relationships, elements,
//!   documents, external references, licenses and cross-reference records

#![warn(missing_docs)]
#![warn(clippy::all)]

mod annotation;
mod checksum;
mod context;
pub mod convert;
mod copy;
mod document;
mod element;
mod enums;
mod external;
mod license;
mod object;
mod relationship;
pub mod schema;

pub use annotation::Annotation;
pub use checksum::Checksum;
pub use context::ModelContext;
pub use convert::{ModelValue, StoredKind};
pub use copy::CopyManager;
pub use document::{SpdxDocument, CURRENT_SPEC_VERSION, DOCUMENT_ID};
pub use element::GenericElement;
pub use enums::{AnnotationType, ChecksumAlgorithm, EnumValue, RelationshipType};
pub use external::{ExternalDocumentRef, ExternalElement};
pub use license::{CrossRef, CrossRefBuilder, ExtractedLicense, ListedLicense};
pub use object::{ModelCollection, ModelObject};
pub use relationship::Relationship;
