//! Store abstraction
//!
//! This module defines the [`ModelStore`] trait, the contract every storage
//! backend implements. Any backend honoring it (map-backed, graph-backed or
//! other) is interchangeable under the model layer.
//!
//! Atomicity: implementations must provide at least per-object read/write
//! atomicity (a single property mutation is never observed half-applied).
//! The model layer never mutates two objects as one atomic unit.
//!
//! Read semantics for unknown ids are soft: value reads return `None` and
//! collection reads return empty. Writes to an unknown id and `type_of`
//! fail with `SourceMissing`.

use crate::error::Result;
use crate::types::{DocumentUri, IdType, TypeTag};
use crate::value::StoredValue;

/// Abstract store contract consumed by the model layer
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait ModelStore: Send + Sync {
    /// Create an object of `type_tag` at `(document, id)`
    ///
    /// # Errors
    ///
    /// `DuplicateId` if the id already exists in the document, `InvalidId`
    /// if the id is syntactically invalid for its scheme.
    fn create(&self, document: &DocumentUri, id: &str, type_tag: TypeTag) -> Result<()>;

    /// Whether an object exists at `(document, id)`
    fn exists(&self, document: &DocumentUri, id: &str) -> Result<bool>;

    /// Type tag stored at `(document, id)`
    ///
    /// # Errors
    ///
    /// `SourceMissing` if no object exists there.
    fn type_of(&self, document: &DocumentUri, id: &str) -> Result<TypeTag>;

    /// Read a single-valued property
    ///
    /// Returns `None` when the property is absent or the object does not
    /// exist.
    fn get_value(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
    ) -> Result<Option<StoredValue>>;

    /// Write a single-valued property, replacing any previous value
    ///
    /// # Errors
    ///
    /// `SourceMissing` if the object does not exist.
    fn set_value(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: StoredValue,
    ) -> Result<()>;

    /// Remove a property entirely, single-valued or collection
    ///
    /// Removing an absent property is a no-op; removing on an unknown
    /// object is also a no-op (there is nothing to remove).
    fn remove_value(&self, document: &DocumentUri, id: &str, property: &str) -> Result<()>;

    /// Read all values of a collection property, in insertion order
    ///
    /// Empty when the property is absent or the object does not exist.
    fn collection_values(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
    ) -> Result<Vec<StoredValue>>;

    /// Append a value to a collection property
    ///
    /// # Errors
    ///
    /// `SourceMissing` if the object does not exist.
    fn collection_add(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: StoredValue,
    ) -> Result<()>;

    /// Remove the first occurrence of a value from a collection property
    ///
    /// Returns whether a value was removed.
    fn collection_remove(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: &StoredValue,
    ) -> Result<bool>;

    /// Whether a collection property contains a value
    fn collection_contains(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: &StoredValue,
    ) -> Result<bool>;

    /// Number of values in a collection property
    fn collection_size(&self, document: &DocumentUri, id: &str, property: &str) -> Result<usize>;

    /// Allocate a fresh identifier of `id_type` scoped to `document`
    ///
    /// Allocation is collision-free within the document. Listed-license
    /// identifiers are never allocated by any backend.
    ///
    /// # Errors
    ///
    /// `InvalidId` when asked to allocate a `ListedLicense` id.
    fn next_id(&self, id_type: IdType, document: &DocumentUri) -> Result<String>;
}
