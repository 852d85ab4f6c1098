//! Core types for the spdxdb object store
//!
//! This module defines the foundational types:
//! - DocumentUri: URI identifying a document, the identifier-namespace scope
//! - IdType: classification of identifiers by allocation scheme
//! - TypeTag: type discriminator for concrete model object types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vocab;

/// URI identifying a document
///
/// A document is the unit of identifier-namespace scoping: identifiers are
/// unique only within a (store, document) pair, never globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Create a document URI from a string
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the URI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Classification of an identifier by allocation scheme
///
/// Identifiers are plain strings; the classification is derived from their
/// shape. Allocation is store-mediated (`ModelStore::next_id`) and must be
/// collision-free within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdType {
    /// Opaque session-scoped identifier, never reused
    Anonymous,
    /// Document-local element identifier (`SPDXRef-` prefixed)
    SpdxId,
    /// User- or generator-supplied license identifier (`LicenseRef-` prefixed)
    LicenseRef,
    /// Names an external document mapping (`DocumentRef-` prefixed)
    DocumentRef,
    /// Drawn from the fixed listed-license registry, never allocated here
    ListedLicense,
}

impl IdType {
    /// Classify an identifier string by its shape
    ///
    /// Prefixed schemes win over the listed-license registry; anything that
    /// matches neither a known prefix nor the registry is treated as an
    /// opaque (anonymous-style) identifier.
    pub fn of(id: &str) -> IdType {
        if id.starts_with(vocab::SPDX_ID_PREFIX) {
            IdType::SpdxId
        } else if id.starts_with(vocab::LICENSE_REF_PREFIX) {
            IdType::LicenseRef
        } else if id.starts_with(vocab::DOCUMENT_REF_PREFIX) {
            IdType::DocumentRef
        } else if vocab::is_listed_license_id(id) {
            IdType::ListedLicense
        } else {
            IdType::Anonymous
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdType::Anonymous => "Anonymous",
            IdType::SpdxId => "SpdxId",
            IdType::LicenseRef => "LicenseRef",
            IdType::DocumentRef => "DocumentRef",
            IdType::ListedLicense => "ListedLicense",
        };
        write!(f, "{name}")
    }
}

/// Validate the suffix of a prefixed identifier
///
/// `SPDXRef-`, `LicenseRef-` and `DocumentRef-` identifiers must carry a
/// non-empty suffix of alphanumerics, `.`, `-` and `+`.
pub fn valid_id_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+')
}

/// Type discriminator for concrete model object types
///
/// The tag written at an object's store location is immutable once the
/// object is created: re-observing the same (store, document, id) always
/// yields the same tag. The enum is closed; tags arriving from outside the
/// process go through [`TypeTag::from_str`], which is the unknown-type
/// error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Review or other annotation attached to an element
    Annotation,
    /// Algorithm + digest value pair
    Checksum,
    /// Directed, typed association between two elements
    Relationship,
    /// Generic element with name, comment, annotations and relationships
    GenericElement,
    /// Document root element
    SpdxDocument,
    /// Mapping from a short local name to an external document
    ExternalDocumentRef,
    /// License drawn from the listed-license registry
    ListedLicense,
    /// User-extracted licensing info (LicenseRef-scoped)
    ExtractedLicense,
    /// Cross-reference record attached to a listed license
    CrossRef,
}

impl TypeTag {
    /// All concrete model object types
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Annotation,
        TypeTag::Checksum,
        TypeTag::Relationship,
        TypeTag::GenericElement,
        TypeTag::SpdxDocument,
        TypeTag::ExternalDocumentRef,
        TypeTag::ListedLicense,
        TypeTag::ExtractedLicense,
        TypeTag::CrossRef,
    ];

    /// Symbolic type name, as used by the resource factory
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Annotation => "Annotation",
            TypeTag::Checksum => "Checksum",
            TypeTag::Relationship => "Relationship",
            TypeTag::GenericElement => "GenericElement",
            TypeTag::SpdxDocument => "SpdxDocument",
            TypeTag::ExternalDocumentRef => "ExternalDocumentRef",
            TypeTag::ListedLicense => "ListedLicense",
            TypeTag::ExtractedLicense => "ExtractedLicense",
            TypeTag::CrossRef => "CrossRef",
        }
    }

    /// Parse a symbolic type name
    ///
    /// Returns None for tags with no registered model type; callers map
    /// that to `SpdxError::UnknownType`.
    pub fn from_str(s: &str) -> Option<TypeTag> {
        TypeTag::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Whether objects of this type are document elements
    ///
    /// Elements are the targets relationships may point at.
    pub fn is_element(&self) -> bool {
        matches!(self, TypeTag::GenericElement | TypeTag::SpdxDocument)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uri_display_roundtrip() {
        let uri = DocumentUri::new("http://test.document.uri/1");
        assert_eq!(uri.as_str(), "http://test.document.uri/1");
        assert_eq!(uri.to_string(), "http://test.document.uri/1");
    }

    #[test]
    fn id_type_classifies_prefixed_ids() {
        assert_eq!(IdType::of("SPDXRef-gnrtd12"), IdType::SpdxId);
        assert_eq!(IdType::of("SPDXRef-DOCUMENT"), IdType::SpdxId);
        assert_eq!(IdType::of("LicenseRef-mine"), IdType::LicenseRef);
        assert_eq!(IdType::of("DocumentRef-external"), IdType::DocumentRef);
    }

    #[test]
    fn id_type_classifies_listed_license_ids() {
        assert_eq!(IdType::of("Apache-2.0"), IdType::ListedLicense);
        assert_eq!(IdType::of("AFL-3.0"), IdType::ListedLicense);
    }

    #[test]
    fn id_type_falls_back_to_anonymous() {
        assert_eq!(IdType::of("__anon_3fd2__"), IdType::Anonymous);
        assert_eq!(IdType::of("ID1"), IdType::Anonymous);
    }

    #[test]
    fn id_suffix_validation() {
        assert!(valid_id_suffix("gnrtd12"));
        assert!(valid_id_suffix("my-license.2"));
        assert!(!valid_id_suffix(""));
        assert!(!valid_id_suffix("has space"));
        assert!(!valid_id_suffix("has#hash"));
    }

    #[test]
    fn type_tag_name_roundtrip() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_str(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn type_tag_unknown_name_is_none() {
        assert_eq!(TypeTag::from_str("NotAModelType"), None);
        assert_eq!(TypeTag::from_str(""), None);
    }

    #[test]
    fn element_tags() {
        assert!(TypeTag::GenericElement.is_element());
        assert!(TypeTag::SpdxDocument.is_element());
        assert!(!TypeTag::Checksum.is_element());
        assert!(!TypeTag::CrossRef.is_element());
    }
}
