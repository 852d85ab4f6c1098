//! Storage ↔ model conversion
//!
//! Bidirectional mapping between [`StoredValue`]s and rich model values:
//! references become bound model objects, individual URIs become enum
//! constants or external element references, scalars pass through
//! unchanged. The inverse direction enforces the context-compatibility
//! rule before a reference is produced.

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;
use spdx_core::value::{SimpleUriValue, StoredValue, TypedValue};

use crate::context::ModelContext;
use crate::enums::EnumValue;
use crate::external::ExternalElement;
use crate::object::ModelObject;
use crate::schema::ValueKind;

/// A property value in its model representation
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValue {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// String literal
    Str(String),
    /// Owned sub-object living in the same (store, document)
    Object(ModelObject),
    /// Enumeration constant
    Enum(EnumValue),
    /// Reference to an element in a different document, carried by URI
    External(ExternalElement),
}

impl ModelValue {
    /// Convenience string accessor
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ModelValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Convenience bool accessor
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModelValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convenience integer accessor
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ModelValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for ModelValue {
    fn from(s: &str) -> Self {
        ModelValue::Str(s.to_string())
    }
}

impl From<String> for ModelValue {
    fn from(s: String) -> Self {
        ModelValue::Str(s)
    }
}

impl From<bool> for ModelValue {
    fn from(b: bool) -> Self {
        ModelValue::Bool(b)
    }
}

impl From<i64> for ModelValue {
    fn from(i: i64) -> Self {
        ModelValue::Int(i)
    }
}

impl From<EnumValue> for ModelValue {
    fn from(v: EnumValue) -> Self {
        ModelValue::Enum(v)
    }
}

impl From<ModelObject> for ModelValue {
    fn from(o: ModelObject) -> Self {
        ModelValue::Object(o)
    }
}

impl From<ExternalElement> for ModelValue {
    fn from(e: ExternalElement) -> Self {
        ModelValue::External(e)
    }
}

/// Which stored variant a model value serializes to
///
/// Used by validators to type-check property assignments before they
/// reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredKind {
    /// String, boolean or integer literal
    Scalar,
    /// Reference to an owned sub-object
    Typed,
    /// Individual URI
    Uri,
}

/// Report which stored variant `value` serializes to
pub fn stored_kind_of(value: &ModelValue) -> StoredKind {
    match value {
        ModelValue::Bool(_) | ModelValue::Int(_) | ModelValue::Str(_) => StoredKind::Scalar,
        ModelValue::Object(_) => StoredKind::Typed,
        ModelValue::Enum(_) | ModelValue::External(_) => StoredKind::Uri,
    }
}

/// Convert a stored value to its model representation in `ctx`
///
/// - references bind a model object of the declared type
/// - individual URIs resolve to enum constants, or to external element
///   references when the URI names a different document
/// - scalars pass through unchanged
pub fn stored_to_model(value: StoredValue, ctx: &ModelContext) -> Result<ModelValue> {
    match value {
        StoredValue::Bool(b) => Ok(ModelValue::Bool(b)),
        StoredValue::Int(i) => Ok(ModelValue::Int(i)),
        StoredValue::Str(s) => Ok(ModelValue::Str(s)),
        StoredValue::Typed(TypedValue { id, type_tag }) => Ok(ModelValue::Object(
            ModelObject::with_id(ctx, &id, type_tag, false)?,
        )),
        StoredValue::Uri(SimpleUriValue { uri }) => {
            if let Some(constant) = EnumValue::from_uri(&uri) {
                return Ok(ModelValue::Enum(constant));
            }
            if let Ok(external) = ExternalElement::from_uri(&uri) {
                if external.external_document_uri() != ctx.document_uri() {
                    return Ok(ModelValue::External(external));
                }
            }
            Err(SpdxError::UnresolvableUri(uri))
        }
    }
}

/// Apply [`stored_to_model`] when a value is present
pub fn opt_stored_to_model(
    value: Option<StoredValue>,
    ctx: &ModelContext,
) -> Result<Option<ModelValue>> {
    value.map(|v| stored_to_model(v, ctx)).transpose()
}

/// Convert a model value to its stored representation for `ctx`
///
/// Model objects must live in the compatible (store, document); objects
/// from other contexts must be copied, never aliased.
pub fn model_to_stored(value: &ModelValue, ctx: &ModelContext) -> Result<StoredValue> {
    match value {
        ModelValue::Bool(b) => Ok(StoredValue::Bool(*b)),
        ModelValue::Int(i) => Ok(StoredValue::Int(*i)),
        ModelValue::Str(s) => Ok(StoredValue::Str(s.clone())),
        ModelValue::Object(obj) => {
            if !obj.context().compatible_with(ctx) {
                return Err(SpdxError::IncompatibleContext(format!(
                    "object {} lives in document {}, not {}; copy it instead of aliasing",
                    obj.id(),
                    obj.context().document_uri(),
                    ctx.document_uri(),
                )));
            }
            Ok(StoredValue::Typed(TypedValue::new(
                obj.id(),
                obj.type_tag(),
            )))
        }
        ModelValue::Enum(v) => Ok(StoredValue::Uri(SimpleUriValue::new(v.individual_uri()))),
        ModelValue::External(e) => Ok(StoredValue::Uri(SimpleUriValue::new(e.individual_uri()))),
    }
}

/// Whether a model value satisfies a declared value kind
pub fn kind_matches(kind: ValueKind, value: &ModelValue) -> bool {
    match kind {
        ValueKind::Str => matches!(value, ModelValue::Str(_)),
        ValueKind::Bool => matches!(value, ModelValue::Bool(_)),
        ValueKind::Int => matches!(value, ModelValue::Int(_)),
        ValueKind::Individual => matches!(value, ModelValue::Enum(_)),
        ValueKind::Object(tag) => {
            matches!(value, ModelValue::Object(obj) if obj.type_tag() == tag)
        }
        ValueKind::Element => match value {
            ModelValue::Object(obj) => obj.type_tag().is_element(),
            ModelValue::External(_) => true,
            _ => false,
        },
    }
}
