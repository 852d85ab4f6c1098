//! Relationships
//!
//! A relationship ties its owning element to a related element, in-document
//! or external, under a typed predicate.

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;

use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::enums::{EnumValue, RelationshipType};
use crate::object::ModelObject;
use crate::schema::prop;

/// A typed edge from an element to a related element
///
/// The related end is either an in-document element or an
/// [`crate::ExternalElement`] reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship(ModelObject);

impl Relationship {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::Relationship;

    /// Create a relationship under a fresh anonymous id
    ///
    /// `related` must be an element value: an element-typed object from a
    /// compatible context, or an external element reference.
    pub fn new(
        ctx: &ModelContext,
        relationship_type: RelationshipType,
        related: ModelValue,
    ) -> Result<Relationship> {
        let obj = ModelObject::new(ctx, Self::TYPE)?;
        obj.set_property(prop::RELATED_ELEMENT, related)?;
        obj.set_property(
            prop::RELATIONSHIP_TYPE,
            ModelValue::Enum(relationship_type.into()),
        )?;
        Ok(Relationship(obj))
    }

    /// Bind to an existing relationship
    pub fn bind(ctx: &ModelContext, id: &str) -> Result<Relationship> {
        Ok(Relationship(ModelObject::with_id(ctx, id, Self::TYPE, false)?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<Relationship> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(Relationship(obj))
    }

    /// This relationship's identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// The predicate of this relationship
    pub fn relationship_type(&self) -> Result<Option<RelationshipType>> {
        Ok(match self.0.get_property(prop::RELATIONSHIP_TYPE)? {
            Some(ModelValue::Enum(EnumValue::Relationship(t))) => Some(t),
            _ => None,
        })
    }

    /// Set the predicate of this relationship
    pub fn set_relationship_type(&self, relationship_type: RelationshipType) -> Result<()> {
        self.0.set_property(
            prop::RELATIONSHIP_TYPE,
            ModelValue::Enum(relationship_type.into()),
        )
    }

    /// The related end: an in-document object or an external reference
    pub fn related_element(&self) -> Result<Option<ModelValue>> {
        self.0.get_property(prop::RELATED_ELEMENT)
    }

    /// Set the related end
    pub fn set_related_element(&self, related: ModelValue) -> Result<()> {
        self.0.set_property(prop::RELATED_ELEMENT, related)
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

    /// Diagnostics for this relationship; see [`ModelObject::verify`]
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<Relationship> for ModelObject {
    fn from(r: Relationship) -> Self {
        r.0
    }
}
