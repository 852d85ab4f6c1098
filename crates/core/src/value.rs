//! Stored value model
//!
//! This module defines [`StoredValue`], the closed union of everything a
//! property slot may hold:
//! - scalars: string, boolean, integer literals
//! - `Typed` (a.k.a. TypedValue): an in-store pointer `(id, type)` to an
//!   owned sub-object in the same (store, document)
//! - `Uri` (a.k.a. SimpleUriValue): a URI naming either a fixed enumeration
//!   constant or an element living in a different document
//!
//! Equality is structural: scalars by literal and type, references by
//! `(id, type)`, individuals by URI string. Different variants are never
//! equal.

use serde::{Deserialize, Serialize};

use crate::types::TypeTag;

/// In-store pointer to an owned sub-object of a declared type
///
/// The referent lives in the same (store, document) as the object holding
/// the reference; cross-document associations must go through an external
/// document ref plus a [`SimpleUriValue`], never a raw reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedValue {
    /// Document-local identifier of the referent
    pub id: String,
    /// Declared type of the referent, immutable once created
    pub type_tag: TypeTag,
}

impl TypedValue {
    /// Create a reference to `id` with declared type `type_tag`
    pub fn new(id: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: id.into(),
            type_tag,
        }
    }
}

/// URI-valued individual
///
/// Names either a fixed enumeration constant or an external element of the
/// shape `<externalDocumentUri>#<localId>`. External elements are carried
/// by URI only and never copied by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleUriValue {
    /// The canonical individual URI
    pub uri: String,
}

impl SimpleUriValue {
    /// Create an individual from its canonical URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// The unit of what a property slot may hold
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredValue {
    /// Boolean literal
    Bool(bool),
    /// 64-bit signed integer literal
    Int(i64),
    /// String literal
    Str(String),
    /// Reference to an owned sub-object in the same (store, document)
    Typed(TypedValue),
    /// URI naming an enum constant or an external element
    Uri(SimpleUriValue),
}

impl StoredValue {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Bool(_) => "Bool",
            StoredValue::Int(_) => "Int",
            StoredValue::Str(_) => "Str",
            StoredValue::Typed(_) => "Typed",
            StoredValue::Uri(_) => "Uri",
        }
    }

    /// Check if this is a scalar (string, boolean or integer literal)
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            StoredValue::Bool(_) | StoredValue::Int(_) | StoredValue::Str(_)
        )
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoredValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StoredValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a Str value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the reference if this is a Typed value
    pub fn as_typed(&self) -> Option<&TypedValue> {
        match self {
            StoredValue::Typed(tv) => Some(tv),
            _ => None,
        }
    }

    /// Get the individual URI if this is a Uri value
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            StoredValue::Uri(u) => Some(&u.uri),
            _ => None,
        }
    }
}

impl From<bool> for StoredValue {
    fn from(b: bool) -> Self {
        StoredValue::Bool(b)
    }
}

impl From<i64> for StoredValue {
    fn from(i: i64) -> Self {
        StoredValue::Int(i)
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        StoredValue::Str(s.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        StoredValue::Str(s)
    }
}

impl From<TypedValue> for StoredValue {
    fn from(tv: TypedValue) -> Self {
        StoredValue::Typed(tv)
    }
}

impl From<SimpleUriValue> for StoredValue {
    fn from(u: SimpleUriValue) -> Self {
        StoredValue::Uri(u)
    }
}
