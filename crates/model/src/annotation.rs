//! Annotations
//!
//! An annotation records who said what about an element, when, and in
//! what capacity. All four properties are required.

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;

use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::enums::{AnnotationType, EnumValue};
use crate::object::ModelObject;
use crate::schema::prop;

/// A review or other remark attached to an element
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation(ModelObject);

impl Annotation {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::Annotation;

    /// Create a complete annotation under a fresh anonymous id
    pub fn new(
        ctx: &ModelContext,
        annotator: &str,
        annotation_type: AnnotationType,
        date: &str,
        comment: &str,
    ) -> Result<Annotation> {
        let obj = ModelObject::new(ctx, Self::TYPE)?;
        obj.set_property(prop::ANNOTATOR, ModelValue::from(annotator))?;
        obj.set_property(prop::ANNOTATION_TYPE, ModelValue::Enum(annotation_type.into()))?;
        obj.set_property(prop::ANNOTATION_DATE, ModelValue::from(date))?;
        obj.set_property(prop::COMMENT, ModelValue::from(comment))?;
        Ok(Annotation(obj))
    }

    /// Bind to an existing annotation
    pub fn bind(ctx: &ModelContext, id: &str) -> Result<Annotation> {
        Ok(Annotation(ModelObject::with_id(ctx, id, Self::TYPE, false)?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<Annotation> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(Annotation(obj))
    }

    /// This annotation's identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// Who made the annotation
    pub fn annotator(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::ANNOTATOR)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set who made the annotation
    pub fn set_annotator(&self, annotator: &str) -> Result<()> {
        self.0.set_property(prop::ANNOTATOR, ModelValue::from(annotator))
    }

    /// The kind of annotation
    pub fn annotation_type(&self) -> Result<Option<AnnotationType>> {
        Ok(match self.0.get_property(prop::ANNOTATION_TYPE)? {
            Some(ModelValue::Enum(EnumValue::Annotation(t))) => Some(t),
            _ => None,
        })
    }

    /// Set the kind of annotation
    pub fn set_annotation_type(&self, annotation_type: AnnotationType) -> Result<()> {
        self.0
            .set_property(prop::ANNOTATION_TYPE, ModelValue::Enum(annotation_type.into()))
    }

    /// When the annotation was made
    pub fn annotation_date(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::ANNOTATION_DATE)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set when the annotation was made
    pub fn set_annotation_date(&self, date: &str) -> Result<()> {
        self.0.set_property(prop::ANNOTATION_DATE, ModelValue::from(date))
    }

    /// The annotation text
    pub fn comment(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::COMMENT)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the annotation text
    pub fn set_comment(&self, comment: &str) -> Result<()> {
        self.0.set_property(prop::COMMENT, ModelValue::from(comment))
    }

    /// Diagnostics for this annotation; see [`ModelObject::verify`]
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<Annotation> for ModelObject {
    fn from(a: Annotation) -> Self {
        a.0
    }
}
