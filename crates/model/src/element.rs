//! Generic elements

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;

use crate::annotation::Annotation;
use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::object::{ModelCollection, ModelObject};
use crate::relationship::Relationship;
use crate::schema::prop;

/// An element with no more specific type: a name, a comment, and its
/// attached annotations and relationships
#[derive(Debug, Clone, PartialEq)]
pub struct GenericElement(ModelObject);

impl GenericElement {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::GenericElement;

    /// Create an element under a fresh `SPDXRef-` id
    pub fn new(ctx: &ModelContext) -> Result<GenericElement> {
        Ok(GenericElement(ModelObject::new(ctx, Self::TYPE)?))
    }

    /// Create or bind an element at a caller-chosen `SPDXRef-` id
    pub fn with_id(ctx: &ModelContext, id: &str, create: bool) -> Result<GenericElement> {
        Ok(GenericElement(ModelObject::with_id(
            ctx,
            id,
            Self::TYPE,
            create,
        )?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<GenericElement> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(GenericElement(obj))
    }

    /// This element's identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// The element's name
    pub fn name(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::NAME)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the element's name
    pub fn set_name(&self, name: &str) -> Result<()> {
        self.0.set_property(prop::NAME, ModelValue::from(name))
    }

    /// Free-text comment
    pub fn comment(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::COMMENT)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the free-text comment
    pub fn set_comment(&self, comment: &str) -> Result<()> {
        self.0.set_property(prop::COMMENT, ModelValue::from(comment))
    }

    /// The element's annotations
    pub fn annotations(&self) -> Result<ModelCollection> {
        self.0.collection(prop::ANNOTATION)
    }

    /// Attach an annotation
    pub fn add_annotation(&self, annotation: &Annotation) -> Result<()> {
        self.annotations()?
            .add(ModelValue::Object(annotation.as_model().clone()))
    }

    /// The element's relationships
    pub fn relationships(&self) -> Result<ModelCollection> {
        self.0.collection(prop::RELATIONSHIP)
    }

    /// Attach a relationship
    pub fn add_relationship(&self, relationship: &Relationship) -> Result<()> {
        self.relationships()?
            .add(ModelValue::Object(relationship.as_model().clone()))
    }

    /// Diagnostics for this element and everything reachable from it
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// Structural equivalence; see [`ModelObject::equivalent`]
    pub fn equivalent(&self, other: &GenericElement) -> Result<bool> {
        self.0.equivalent(&other.0)
    }

    /// Replace this element's state with `source`'s; see
    /// [`ModelObject::copy_from`]
    pub fn copy_from(&self, source: &GenericElement) -> Result<()> {
        self.0.copy_from(&source.0)
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<GenericElement> for ModelObject {
    fn from(e: GenericElement) -> Self {
        e.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyManager;
    use crate::enums::{AnnotationType, RelationshipType};
    use spdx_core::types::DocumentUri;
    use spdx_storage::InMemStore;
    use std::sync::Arc;

    fn ctx() -> ModelContext {
        ModelContext::new(
            Arc::new(InMemStore::new()),
            DocumentUri::new("http://test.document.uri/1"),
            CopyManager::new(),
        )
    }

    #[test]
    fn fresh_element_is_clean_and_empty() {
        let ctx = ctx();
        let e = GenericElement::new(&ctx).unwrap();
        assert!(e.id().starts_with("SPDXRef-"));
        assert_eq!(e.name().unwrap(), None);
        assert!(e.annotations().unwrap().is_empty().unwrap());
        assert!(e.verify().is_empty());
    }

    #[test]
    fn attaches_annotations_and_relationships() {
        let ctx = ctx();
        let e = GenericElement::new(&ctx).unwrap();
        e.set_name("package-a").unwrap();
        let a = Annotation::new(
            &ctx,
            "Person: Jane",
            AnnotationType::Review,
            "2011-01-29T18:30:22Z",
            "ok",
        )
        .unwrap();
        e.add_annotation(&a).unwrap();
        let other = GenericElement::new(&ctx).unwrap();
        let rel = Relationship::new(
            &ctx,
            RelationshipType::Contains,
            ModelValue::Object(other.as_model().clone()),
        )
        .unwrap();
        e.add_relationship(&rel).unwrap();
        assert_eq!(e.annotations().unwrap().len().unwrap(), 1);
        assert_eq!(e.relationships().unwrap().len().unwrap(), 1);
        assert!(e.verify().is_empty());
    }

    #[test]
    fn equivalence_over_full_shape() {
        let ctx = ctx();
        let a = GenericElement::new(&ctx).unwrap();
        let b = GenericElement::new(&ctx).unwrap();
        a.set_name("same").unwrap();
        b.set_name("same").unwrap();
        assert!(a.equivalent(&b).unwrap());
        b.set_comment("extra").unwrap();
        assert!(!a.equivalent(&b).unwrap());
    }
}
