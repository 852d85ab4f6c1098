//! Cross-store copy
//!
//! [`CopyManager`] duplicates an object and everything it owns from one
//! (store, document) into another. The traversal is an explicit worklist
//! over a translation table from source ids to freshly allocated target
//! ids; an id is translated exactly once per invocation, so shared
//! sub-objects stay shared and cyclic graphs terminate.

use std::collections::HashMap;
use std::sync::Arc;

use spdx_core::error::{Result, SpdxError};
use spdx_core::traits::ModelStore;
use spdx_core::types::{DocumentUri, IdType, TypeTag};
use spdx_core::value::{StoredValue, TypedValue};

use crate::schema::{self, Cardinality};

/// One pending object copy: source id, already-allocated target id
struct CopyJob {
    source_id: String,
    target_id: String,
    type_tag: TypeTag,
}

/// Duplicates object subgraphs across (store, document) pairs
///
/// Stateless and cheap to clone; every `copy` invocation starts from an
/// empty translation table, so repeated copies of the same source produce
/// independent target subgraphs.
#[derive(Debug, Clone, Default)]
pub struct CopyManager;

impl CopyManager {
    /// Create a copy manager
    pub fn new() -> Self {
        CopyManager
    }

    /// Copy the subgraph rooted at `(source_document, source_id)` onto
    /// `(target_document, target_id)`
    ///
    /// The target object is created if missing; its existing properties
    /// are replaced. Owned sub-objects get fresh target ids under their
    /// own scheme, except listed licenses, which keep their registry id.
    /// Individual URIs and scalars are carried verbatim, so external
    /// element references still point at the original external document.
    #[allow(clippy::too_many_arguments)]
    pub fn copy(
        &self,
        target_store: &Arc<dyn ModelStore>,
        target_document: &DocumentUri,
        target_id: &str,
        source_store: &Arc<dyn ModelStore>,
        source_document: &DocumentUri,
        source_id: &str,
        type_tag: TypeTag,
    ) -> Result<()> {
        if !source_store.exists(source_document, source_id)? {
            return Err(SpdxError::SourceMissing {
                document: source_document.to_string(),
                id: source_id.to_string(),
            });
        }
        let found = source_store.type_of(source_document, source_id)?;
        if found != type_tag {
            return Err(SpdxError::TypeMismatch {
                id: source_id.to_string(),
                expected: type_tag,
                found,
            });
        }

        let mut translated: HashMap<String, String> = HashMap::new();
        translated.insert(source_id.to_string(), target_id.to_string());
        let mut worklist = vec![CopyJob {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            type_tag,
        }];

        while let Some(job) = worklist.pop() {
            tracing::debug!(
                source = %job.source_id,
                target = %job.target_id,
                type_tag = %job.type_tag,
                "copying object"
            );
            ensure_target(target_store, target_document, &job.target_id, job.type_tag)?;
            for p in schema::schema_of(job.type_tag) {
                target_store.remove_value(target_document, &job.target_id, p.name)?;
                match p.cardinality {
                    Cardinality::Single => {
                        let value =
                            source_store.get_value(source_document, &job.source_id, p.name)?;
                        if let Some(value) = value {
                            let value = translate(
                                value,
                                target_store,
                                target_document,
                                source_store,
                                source_document,
                                &mut translated,
                                &mut worklist,
                            )?;
                            target_store.set_value(
                                target_document,
                                &job.target_id,
                                p.name,
                                value,
                            )?;
                        }
                    }
                    _ => {
                        let values = source_store.collection_values(
                            source_document,
                            &job.source_id,
                            p.name,
                        )?;
                        for value in values {
                            let value = translate(
                                value,
                                target_store,
                                target_document,
                                source_store,
                                source_document,
                                &mut translated,
                                &mut worklist,
                            )?;
                            target_store.collection_add(
                                target_document,
                                &job.target_id,
                                p.name,
                                value,
                            )?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Create or type-check the object a copy lands on
fn ensure_target(
    store: &Arc<dyn ModelStore>,
    document: &DocumentUri,
    id: &str,
    type_tag: TypeTag,
) -> Result<()> {
    if store.exists(document, id)? {
        let found = store.type_of(document, id)?;
        if found != type_tag {
            return Err(SpdxError::TypeMismatch {
                id: id.to_string(),
                expected: type_tag,
                found,
            });
        }
        return Ok(());
    }
    store.create(document, id, type_tag)
}

/// Rewrite one stored value for the target document
///
/// References are translated through the table, registering a fresh
/// target id and queueing the referent on first sight. Everything else
/// passes through unchanged.
fn translate(
    value: StoredValue,
    target_store: &Arc<dyn ModelStore>,
    target_document: &DocumentUri,
    source_store: &Arc<dyn ModelStore>,
    source_document: &DocumentUri,
    translated: &mut HashMap<String, String>,
    worklist: &mut Vec<CopyJob>,
) -> Result<StoredValue> {
    let reference = match value {
        StoredValue::Typed(reference) => reference,
        other => return Ok(other),
    };
    if let Some(target_id) = translated.get(&reference.id) {
        return Ok(StoredValue::Typed(TypedValue::new(
            target_id.clone(),
            reference.type_tag,
        )));
    }
    if !source_store.exists(source_document, &reference.id)? {
        return Err(SpdxError::SourceMissing {
            document: source_document.to_string(),
            id: reference.id.clone(),
        });
    }
    let found = source_store.type_of(source_document, &reference.id)?;
    if found != reference.type_tag {
        return Err(SpdxError::TypeMismatch {
            id: reference.id.clone(),
            expected: reference.type_tag,
            found,
        });
    }
    let target_id = match IdType::of(&reference.id) {
        // Registry ids are stable across documents.
        IdType::ListedLicense => reference.id.clone(),
        scheme => target_store.next_id(scheme, target_document)?,
    };
    translated.insert(reference.id.clone(), target_id.clone());
    worklist.push(CopyJob {
        source_id: reference.id,
        target_id: target_id.clone(),
        type_tag: reference.type_tag,
    });
    Ok(StoredValue::Typed(TypedValue::new(
        target_id,
        reference.type_tag,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ModelContext;
    use crate::convert::ModelValue;
    use crate::enums::{AnnotationType, RelationshipType};
    use crate::object::ModelObject;
    use crate::schema::prop;
    use spdx_storage::InMemStore;

    fn ctx(uri: &str) -> ModelContext {
        ModelContext::new(
            Arc::new(InMemStore::new()),
            DocumentUri::new(uri),
            CopyManager::new(),
        )
    }

    fn annotation(ctx: &ModelContext) -> ModelObject {
        let obj = ModelObject::new(ctx, TypeTag::Annotation).unwrap();
        obj.set_property(prop::ANNOTATOR, ModelValue::from("Person: Jane"))
            .unwrap();
        obj.set_property(
            prop::ANNOTATION_TYPE,
            ModelValue::Enum(AnnotationType::Other.into()),
        )
        .unwrap();
        obj.set_property(prop::ANNOTATION_DATE, ModelValue::from("2011-01-29T18:30:22Z"))
            .unwrap();
        obj.set_property(prop::COMMENT, ModelValue::from("copied"))
            .unwrap();
        obj
    }

    #[test]
    fn copy_produces_an_equivalent_object() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let source = annotation(&src);
        let target = ModelObject::new(&dst, TypeTag::Annotation).unwrap();
        target.copy_from(&source).unwrap();
        assert!(target.equivalent(&source).unwrap());
    }

    #[test]
    fn copy_replaces_stale_target_state() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let source = annotation(&src);
        let target = ModelObject::new(&dst, TypeTag::Annotation).unwrap();
        target
            .set_property(prop::COMMENT, ModelValue::from("stale"))
            .unwrap();
        target.copy_from(&source).unwrap();
        assert_eq!(
            target.get_property(prop::COMMENT).unwrap(),
            Some(ModelValue::from("copied"))
        );
    }

    #[test]
    fn shared_subobject_is_copied_once() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let element = ModelObject::new(&src, TypeTag::GenericElement).unwrap();
        let shared = annotation(&src);
        let annotations = element.collection(prop::ANNOTATION).unwrap();
        annotations.add(ModelValue::Object(shared.clone())).unwrap();
        annotations.add(ModelValue::Object(shared)).unwrap();

        let target = ModelObject::new(&dst, TypeTag::GenericElement).unwrap();
        target.copy_from(&element).unwrap();
        let copied = target.collection(prop::ANNOTATION).unwrap().values().unwrap();
        assert_eq!(copied.len(), 2);
        match (&copied[0], &copied[1]) {
            (ModelValue::Object(a), ModelValue::Object(b)) => {
                assert_eq!(a.id(), b.id(), "shared source must stay shared");
            }
            other => panic!("expected two objects, got {other:?}"),
        }
    }

    #[test]
    fn cyclic_graph_terminates_and_round_trips() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let a = ModelObject::new(&src, TypeTag::GenericElement).unwrap();
        let rel = ModelObject::new(&src, TypeTag::Relationship).unwrap();
        rel.set_property(prop::RELATED_ELEMENT, ModelValue::Object(a.clone()))
            .unwrap();
        rel.set_property(
            prop::RELATIONSHIP_TYPE,
            ModelValue::Enum(RelationshipType::Contains.into()),
        )
        .unwrap();
        a.collection(prop::RELATIONSHIP)
            .unwrap()
            .add(ModelValue::Object(rel))
            .unwrap();

        let target = ModelObject::new(&dst, TypeTag::GenericElement).unwrap();
        target.copy_from(&a).unwrap();
        assert!(target.equivalent(&a).unwrap());
        // The copied relationship points back at the copied element, not
        // at a second copy.
        let rels = target.collection(prop::RELATIONSHIP).unwrap().values().unwrap();
        match &rels[0] {
            ModelValue::Object(rel) => {
                match rel.get_property(prop::RELATED_ELEMENT).unwrap() {
                    Some(ModelValue::Object(back)) => assert_eq!(back.id(), target.id()),
                    other => panic!("expected object, got {other:?}"),
                }
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn listed_license_keeps_its_registry_id() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let license =
            ModelObject::with_id(&src, "Apache-2.0", TypeTag::ListedLicense, true).unwrap();
        license
            .set_property(prop::LICENSE_ID, ModelValue::from("Apache-2.0"))
            .unwrap();
        license
            .set_property(prop::LICENSE_TEXT, ModelValue::from("..."))
            .unwrap();
        let element = ModelObject::new(&src, TypeTag::GenericElement).unwrap();
        let rel = ModelObject::new(&src, TypeTag::Relationship).unwrap();
        rel.set_property(prop::RELATED_ELEMENT, ModelValue::Object(element.clone()))
            .unwrap();
        rel.set_property(
            prop::RELATIONSHIP_TYPE,
            ModelValue::Enum(RelationshipType::Describes.into()),
        )
        .unwrap();
        element
            .collection(prop::RELATIONSHIP)
            .unwrap()
            .add(ModelValue::Object(rel))
            .unwrap();

        CopyManager::new()
            .copy(
                dst.store(),
                dst.document_uri(),
                "Apache-2.0",
                src.store(),
                src.document_uri(),
                "Apache-2.0",
                TypeTag::ListedLicense,
            )
            .unwrap();
        assert!(dst
            .store()
            .exists(dst.document_uri(), "Apache-2.0")
            .unwrap());
    }

    #[test]
    fn missing_source_is_an_error() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let err = CopyManager::new()
            .copy(
                dst.store(),
                dst.document_uri(),
                "SPDXRef-t",
                src.store(),
                src.document_uri(),
                "SPDXRef-missing",
                TypeTag::GenericElement,
            )
            .unwrap_err();
        assert!(matches!(err, SpdxError::SourceMissing { .. }));
    }

    #[test]
    fn dangling_reference_in_source_is_an_error() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let element = ModelObject::new(&src, TypeTag::GenericElement).unwrap();
        // Plant a reference to an object that was never created.
        src.store()
            .collection_add(
                src.document_uri(),
                element.id(),
                prop::ANNOTATION,
                StoredValue::Typed(TypedValue::new("__anon-gone__", TypeTag::Annotation)),
            )
            .unwrap();
        let target = ModelObject::new(&dst, TypeTag::GenericElement).unwrap();
        assert!(matches!(
            target.copy_from(&element),
            Err(SpdxError::SourceMissing { .. })
        ));
    }

    #[test]
    fn external_references_are_carried_verbatim() {
        let src = ctx("http://doc/src");
        let dst = ctx("http://doc/dst");
        let element = ModelObject::new(&src, TypeTag::GenericElement).unwrap();
        let rel = ModelObject::new(&src, TypeTag::Relationship).unwrap();
        let ext = crate::external::ExternalElement::from_uri("http://elsewhere#SPDXRef-5").unwrap();
        rel.set_property(prop::RELATED_ELEMENT, ModelValue::External(ext.clone()))
            .unwrap();
        rel.set_property(
            prop::RELATIONSHIP_TYPE,
            ModelValue::Enum(RelationshipType::DependsOn.into()),
        )
        .unwrap();
        element
            .collection(prop::RELATIONSHIP)
            .unwrap()
            .add(ModelValue::Object(rel))
            .unwrap();

        let target = ModelObject::new(&dst, TypeTag::GenericElement).unwrap();
        target.copy_from(&element).unwrap();
        let rels = target.collection(prop::RELATIONSHIP).unwrap().values().unwrap();
        match &rels[0] {
            ModelValue::Object(rel) => assert_eq!(
                rel.get_property(prop::RELATED_ELEMENT).unwrap(),
                Some(ModelValue::External(ext))
            ),
            other => panic!("expected object, got {other:?}"),
        }
    }
}
