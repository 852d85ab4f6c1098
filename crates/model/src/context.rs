//! Explicit model context
//!
//! Every model object is bound to a (store, document, copy manager)
//! triple. The context is an explicit value threaded through constructors
//! and factories; there is no process-wide ambient default.

use std::fmt;
use std::sync::Arc;

use spdx_core::traits::ModelStore;
use spdx_core::types::DocumentUri;

use crate::copy::CopyManager;

/// Binding of a store, a document and a copy manager
///
/// Cheap to clone; the store is shared behind an `Arc`. Two contexts are
/// compatible when they share the same store allocation and document URI;
/// only compatible contexts may reference each other's objects directly.
#[derive(Clone)]
pub struct ModelContext {
    store: Arc<dyn ModelStore>,
    document_uri: DocumentUri,
    copy_manager: CopyManager,
}

impl ModelContext {
    /// Create a context over `store` scoped to `document_uri`
    pub fn new(
        store: Arc<dyn ModelStore>,
        document_uri: DocumentUri,
        copy_manager: CopyManager,
    ) -> Self {
        Self {
            store,
            document_uri,
            copy_manager,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }

    /// The document this context is scoped to
    pub fn document_uri(&self) -> &DocumentUri {
        &self.document_uri
    }

    /// The copy manager used for cross-context copies
    pub fn copy_manager(&self) -> &CopyManager {
        &self.copy_manager
    }

    /// A context over the same store and copy manager, scoped to a
    /// different document
    pub fn for_document(&self, document_uri: DocumentUri) -> Self {
        Self {
            store: Arc::clone(&self.store),
            document_uri,
            copy_manager: self.copy_manager.clone(),
        }
    }

    /// Whether `other` shares this context's store allocation
    pub fn same_store(&self, other: &ModelContext) -> bool {
        store_id(&self.store) == store_id(&other.store)
    }

    /// Whether `other` is the same (store, document) pair
    ///
    /// This is the compatibility rule enforced before any reference is
    /// written: only compatible contexts may alias each other's objects.
    pub fn compatible_with(&self, other: &ModelContext) -> bool {
        self.same_store(other) && self.document_uri == other.document_uri
    }

    /// Opaque identity of this context's store allocation
    pub fn store_id(&self) -> usize {
        store_id(&self.store)
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("store", &format_args!("{:#x}", self.store_id()))
            .field("document_uri", &self.document_uri)
            .finish()
    }
}

/// Identity of a store allocation, used for translation-table keys and
/// the same-store rule
pub(crate) fn store_id(store: &Arc<dyn ModelStore>) -> usize {
    Arc::as_ptr(store) as *const () as usize
}
