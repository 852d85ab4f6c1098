//! Map-backed in-memory store
//!
//! ## Design
//!
//! All state lives behind one `parking_lot::RwLock`: a map from document
//! URI to that document's objects and id-allocation counters. Per-object
//! read/write atomicity follows from the lock; the store never mutates two
//! objects under one mutation call.
//!
//! ## Identifier allocation
//!
//! Generated ids follow the `-gnrtd` counter scheme per (document,
//! id-type), re-checked against existing ids so caller-supplied ids can
//! never collide with generated ones. Anonymous ids are UUID-backed,
//! session-scoped and never reused.
//!
//! ## Serialization
//!
//! `serialize`/`deserialize` move one document's entire state through
//! JSON. The exchange format preserves every scalar, the type tag of every
//! object and the contents of every collection in insertion order;
//! unordered collections make no ordering promise beyond what this backend
//! happens to keep.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use spdx_core::error::{Result, SpdxError};
use spdx_core::traits::ModelStore;
use spdx_core::types::{valid_id_suffix, DocumentUri, IdType, TypeTag};
use spdx_core::value::StoredValue;
use spdx_core::vocab;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectState {
    type_tag: TypeTag,
    #[serde(default)]
    values: HashMap<String, StoredValue>,
    #[serde(default)]
    collections: HashMap<String, Vec<StoredValue>>,
}

impl ObjectState {
    fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            values: HashMap::new(),
            collections: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentState {
    objects: HashMap<String, ObjectState>,
    #[serde(default)]
    spdx_counter: u64,
    #[serde(default)]
    license_counter: u64,
    #[serde(default)]
    doc_ref_counter: u64,
}

/// Map-backed in-memory implementation of the `ModelStore` contract
#[derive(Debug, Default)]
pub struct InMemStore {
    state: RwLock<HashMap<DocumentUri, DocumentState>>,
}

impl InMemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize one document's state to JSON bytes
    ///
    /// An unknown document serializes as an empty document.
    pub fn serialize(&self, document: &DocumentUri) -> Result<Vec<u8>> {
        let state = self.state.read();
        let doc_state = state.get(document).cloned().unwrap_or_default();
        serde_json::to_vec_pretty(&doc_state).map_err(|e| SpdxError::Serialization(e.to_string()))
    }

    /// Replace one document's state from JSON bytes
    pub fn deserialize(&self, document: &DocumentUri, bytes: &[u8]) -> Result<()> {
        let doc_state: DocumentState =
            serde_json::from_slice(bytes).map_err(|e| SpdxError::Serialization(e.to_string()))?;
        tracing::debug!(document = %document, objects = doc_state.objects.len(), "deserialized document");
        self.state.write().insert(document.clone(), doc_state);
        Ok(())
    }

    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(SpdxError::InvalidId("empty identifier".to_string()));
        }
        for prefix in [
            vocab::SPDX_ID_PREFIX,
            vocab::LICENSE_REF_PREFIX,
            vocab::DOCUMENT_REF_PREFIX,
        ] {
            if let Some(suffix) = id.strip_prefix(prefix) {
                if !valid_id_suffix(suffix) {
                    return Err(SpdxError::InvalidId(id.to_string()));
                }
            }
        }
        Ok(())
    }
}

impl ModelStore for InMemStore {
    fn create(&self, document: &DocumentUri, id: &str, type_tag: TypeTag) -> Result<()> {
        Self::validate_id(id)?;
        let mut state = self.state.write();
        let doc_state = state.entry(document.clone()).or_default();
        if doc_state.objects.contains_key(id) {
            return Err(SpdxError::DuplicateId(id.to_string()));
        }
        doc_state
            .objects
            .insert(id.to_string(), ObjectState::new(type_tag));
        Ok(())
    }

    fn exists(&self, document: &DocumentUri, id: &str) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .get(document)
            .is_some_and(|d| d.objects.contains_key(id)))
    }

    fn type_of(&self, document: &DocumentUri, id: &str) -> Result<TypeTag> {
        let state = self.state.read();
        state
            .get(document)
            .and_then(|d| d.objects.get(id))
            .map(|o| o.type_tag)
            .ok_or_else(|| SpdxError::SourceMissing {
                document: document.to_string(),
                id: id.to_string(),
            })
    }

    fn get_value(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
    ) -> Result<Option<StoredValue>> {
        let state = self.state.read();
        Ok(state
            .get(document)
            .and_then(|d| d.objects.get(id))
            .and_then(|o| o.values.get(property).cloned()))
    }

    fn set_value(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: StoredValue,
    ) -> Result<()> {
        let mut state = self.state.write();
        let obj = state
            .get_mut(document)
            .and_then(|d| d.objects.get_mut(id))
            .ok_or_else(|| SpdxError::SourceMissing {
                document: document.to_string(),
                id: id.to_string(),
            })?;
        obj.values.insert(property.to_string(), value);
        Ok(())
    }

    fn remove_value(&self, document: &DocumentUri, id: &str, property: &str) -> Result<()> {
        let mut state = self.state.write();
        if let Some(obj) = state.get_mut(document).and_then(|d| d.objects.get_mut(id)) {
            obj.values.remove(property);
            obj.collections.remove(property);
        }
        Ok(())
    }

    fn collection_values(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
    ) -> Result<Vec<StoredValue>> {
        let state = self.state.read();
        Ok(state
            .get(document)
            .and_then(|d| d.objects.get(id))
            .and_then(|o| o.collections.get(property).cloned())
            .unwrap_or_default())
    }

    fn collection_add(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: StoredValue,
    ) -> Result<()> {
        let mut state = self.state.write();
        let obj = state
            .get_mut(document)
            .and_then(|d| d.objects.get_mut(id))
            .ok_or_else(|| SpdxError::SourceMissing {
                document: document.to_string(),
                id: id.to_string(),
            })?;
        obj.collections
            .entry(property.to_string())
            .or_default()
            .push(value);
        Ok(())
    }

    fn collection_remove(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: &StoredValue,
    ) -> Result<bool> {
        let mut state = self.state.write();
        if let Some(coll) = state
            .get_mut(document)
            .and_then(|d| d.objects.get_mut(id))
            .and_then(|o| o.collections.get_mut(property))
        {
            if let Some(pos) = coll.iter().position(|v| v == value) {
                coll.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn collection_contains(
        &self,
        document: &DocumentUri,
        id: &str,
        property: &str,
        value: &StoredValue,
    ) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .get(document)
            .and_then(|d| d.objects.get(id))
            .and_then(|o| o.collections.get(property))
            .is_some_and(|coll| coll.contains(value)))
    }

    fn collection_size(&self, document: &DocumentUri, id: &str, property: &str) -> Result<usize> {
        let state = self.state.read();
        Ok(state
            .get(document)
            .and_then(|d| d.objects.get(id))
            .and_then(|o| o.collections.get(property))
            .map_or(0, |coll| coll.len()))
    }

    fn next_id(&self, id_type: IdType, document: &DocumentUri) -> Result<String> {
        if id_type == IdType::Anonymous {
            // Session-scoped, never reused, not subject to document counters
            return Ok(format!("__anon{}__", Uuid::new_v4().simple()));
        }
        let mut state = self.state.write();
        let doc_state = state.entry(document.clone()).or_default();
        let (counter, prefix) = match id_type {
            IdType::SpdxId => (&mut doc_state.spdx_counter, vocab::SPDX_ID_PREFIX),
            IdType::LicenseRef => (&mut doc_state.license_counter, vocab::LICENSE_REF_PREFIX),
            IdType::DocumentRef => (&mut doc_state.doc_ref_counter, vocab::DOCUMENT_REF_PREFIX),
            IdType::ListedLicense => {
                return Err(SpdxError::InvalidId(
                    "listed license ids are never allocated".to_string(),
                ))
            }
            IdType::Anonymous => unreachable!(),
        };
        // Skip over any caller-supplied ids that already use the scheme
        loop {
            *counter += 1;
            let candidate = format!("{prefix}gnrtd{counter}");
            if !doc_state.objects.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spdx_core::value::TypedValue;

    fn doc() -> DocumentUri {
        DocumentUri::new("http://test.document.uri/1")
    }

    #[test]
    fn create_and_observe_type() {
        let store = InMemStore::new();
        store.create(&doc(), "SPDXRef-1", TypeTag::GenericElement).unwrap();
        assert!(store.exists(&doc(), "SPDXRef-1").unwrap());
        assert_eq!(
            store.type_of(&doc(), "SPDXRef-1").unwrap(),
            TypeTag::GenericElement
        );
        // Type is immutable: re-creating at the same id is rejected
        assert!(matches!(
            store.create(&doc(), "SPDXRef-1", TypeTag::Checksum),
            Err(SpdxError::DuplicateId(_))
        ));
        assert_eq!(
            store.type_of(&doc(), "SPDXRef-1").unwrap(),
            TypeTag::GenericElement
        );
    }

    #[test]
    fn create_rejects_malformed_prefixed_ids() {
        let store = InMemStore::new();
        assert!(matches!(
            store.create(&doc(), "SPDXRef-", TypeTag::Annotation),
            Err(SpdxError::InvalidId(_))
        ));
        assert!(matches!(
            store.create(&doc(), "LicenseRef-has space", TypeTag::ExtractedLicense),
            Err(SpdxError::InvalidId(_))
        ));
        assert!(matches!(
            store.create(&doc(), "", TypeTag::Annotation),
            Err(SpdxError::InvalidId(_))
        ));
        // Unprefixed ids are accepted as-is (listed licenses, opaque ids)
        store.create(&doc(), "AFL-3.0", TypeTag::ListedLicense).unwrap();
        store.create(&doc(), "ID1", TypeTag::GenericElement).unwrap();
    }

    #[test]
    fn value_reads_are_soft_writes_are_strict() {
        let store = InMemStore::new();
        assert!(store.get_value(&doc(), "missing", "name").unwrap().is_none());
        assert!(matches!(
            store.set_value(&doc(), "missing", "name", StoredValue::from("x")),
            Err(SpdxError::SourceMissing { .. })
        ));
    }

    #[test]
    fn remove_value_clears_single_and_collection() {
        let store = InMemStore::new();
        store.create(&doc(), "SPDXRef-1", TypeTag::ListedLicense).unwrap();
        store
            .set_value(&doc(), "SPDXRef-1", "name", StoredValue::from("n"))
            .unwrap();
        store
            .collection_add(&doc(), "SPDXRef-1", "seeAlso", StoredValue::from("u"))
            .unwrap();
        store.remove_value(&doc(), "SPDXRef-1", "name").unwrap();
        store.remove_value(&doc(), "SPDXRef-1", "seeAlso").unwrap();
        assert!(store.get_value(&doc(), "SPDXRef-1", "name").unwrap().is_none());
        assert_eq!(store.collection_size(&doc(), "SPDXRef-1", "seeAlso").unwrap(), 0);
        // Removing on an unknown object is a no-op
        store.remove_value(&doc(), "missing", "name").unwrap();
    }

    #[test]
    fn generated_ids_skip_existing_objects() {
        let store = InMemStore::new();
        // Claim the first generated id by hand
        store
            .create(&doc(), "SPDXRef-gnrtd1", TypeTag::GenericElement)
            .unwrap();
        let id = store.next_id(IdType::SpdxId, &doc()).unwrap();
        assert_eq!(id, "SPDXRef-gnrtd2");
    }

    #[test]
    fn generated_ids_are_scoped_per_document() {
        let store = InMemStore::new();
        let doc2 = DocumentUri::new("http://test.document.uri/2");
        assert_eq!(store.next_id(IdType::SpdxId, &doc()).unwrap(), "SPDXRef-gnrtd1");
        assert_eq!(store.next_id(IdType::SpdxId, &doc2).unwrap(), "SPDXRef-gnrtd1");
        assert_eq!(store.next_id(IdType::SpdxId, &doc()).unwrap(), "SPDXRef-gnrtd2");
        assert_eq!(
            store.next_id(IdType::LicenseRef, &doc()).unwrap(),
            "LicenseRef-gnrtd1"
        );
        assert_eq!(
            store.next_id(IdType::DocumentRef, &doc()).unwrap(),
            "DocumentRef-gnrtd1"
        );
    }

    #[test]
    fn anonymous_ids_are_never_reused() {
        let store = InMemStore::new();
        let a = store.next_id(IdType::Anonymous, &doc()).unwrap();
        let b = store.next_id(IdType::Anonymous, &doc()).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("__anon"));
    }

    #[test]
    fn listed_license_ids_are_never_allocated() {
        let store = InMemStore::new();
        assert!(matches!(
            store.next_id(IdType::ListedLicense, &doc()),
            Err(SpdxError::InvalidId(_))
        ));
    }

    #[test]
    fn serialize_roundtrip_preserves_document_state() {
        let store = InMemStore::new();
        store.create(&doc(), "SPDXRef-1", TypeTag::GenericElement).unwrap();
        store
            .set_value(&doc(), "SPDXRef-1", "name", StoredValue::from("element"))
            .unwrap();
        store
            .set_value(&doc(), "SPDXRef-1", "count", StoredValue::Int(5))
            .unwrap();
        store
            .set_value(&doc(), "SPDXRef-1", "flag", StoredValue::Bool(true))
            .unwrap();
        store.create(&doc(), "__anon1__", TypeTag::Checksum).unwrap();
        store
            .set_value(
                &doc(),
                "SPDXRef-1",
                "checksum",
                StoredValue::Typed(TypedValue::new("__anon1__", TypeTag::Checksum)),
            )
            .unwrap();
        for url in ["http://a", "http://b"] {
            store
                .collection_add(&doc(), "SPDXRef-1", "seeAlso", StoredValue::from(url))
                .unwrap();
        }

        let bytes = store.serialize(&doc()).unwrap();
        let restored = InMemStore::new();
        restored.deserialize(&doc(), &bytes).unwrap();

        assert_eq!(
            restored.type_of(&doc(), "SPDXRef-1").unwrap(),
            TypeTag::GenericElement
        );
        assert_eq!(
            restored.get_value(&doc(), "SPDXRef-1", "name").unwrap(),
            Some(StoredValue::from("element"))
        );
        assert_eq!(
            restored.get_value(&doc(), "SPDXRef-1", "count").unwrap(),
            Some(StoredValue::Int(5))
        );
        assert_eq!(
            restored.get_value(&doc(), "SPDXRef-1", "flag").unwrap(),
            Some(StoredValue::Bool(true))
        );
        assert_eq!(
            restored.get_value(&doc(), "SPDXRef-1", "checksum").unwrap(),
            Some(StoredValue::Typed(TypedValue::new("__anon1__", TypeTag::Checksum)))
        );
        let see_also = restored.collection_values(&doc(), "SPDXRef-1", "seeAlso").unwrap();
        assert_eq!(see_also.len(), 2);
        assert!(see_also.contains(&StoredValue::from("http://a")));
        assert!(see_also.contains(&StoredValue::from("http://b")));
    }

    #[test]
    fn serialize_unknown_document_is_empty() {
        let store = InMemStore::new();
        let bytes = store.serialize(&doc()).unwrap();
        let restored = InMemStore::new();
        restored.deserialize(&doc(), &bytes).unwrap();
        assert!(!restored.exists(&doc(), "SPDXRef-1").unwrap());
    }

    #[test]
    fn deserialize_rejects_malformed_bytes() {
        let store = InMemStore::new();
        assert!(matches!(
            store.deserialize(&doc(), b"not json"),
            Err(SpdxError::Serialization(_))
        ));
    }

    #[test]
    fn counters_survive_serialization() {
        let store = InMemStore::new();
        let id = store.next_id(IdType::SpdxId, &doc()).unwrap();
        store.create(&doc(), &id, TypeTag::GenericElement).unwrap();
        let bytes = store.serialize(&doc()).unwrap();

        let restored = InMemStore::new();
        restored.deserialize(&doc(), &bytes).unwrap();
        let next = restored.next_id(IdType::SpdxId, &doc()).unwrap();
        assert_ne!(next, id);
    }
}
