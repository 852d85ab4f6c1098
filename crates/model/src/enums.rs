//! Enumeration individuals
//!
//! Fixed vocabulary constants a property may hold, each with one canonical
//! individual URI. A URI that matches the registry converts back to its
//! constant; anything else is either an external element reference or
//! unresolvable.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Kind of annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationType {
    /// Review annotation
    Review,
    /// Any other annotation
    Other,
}

impl AnnotationType {
    const ALL: [AnnotationType; 2] = [AnnotationType::Review, AnnotationType::Other];

    /// Canonical individual URI
    pub fn individual_uri(&self) -> &'static str {
        match self {
            AnnotationType::Review => "http://spdx.org/rdf/terms#annotationType_review",
            AnnotationType::Other => "http://spdx.org/rdf/terms#annotationType_other",
        }
    }
}

/// Digest algorithm of a checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// MD5 (128-bit digest)
    Md5,
    /// SHA-1 (160-bit digest)
    Sha1,
    /// SHA-256 (256-bit digest)
    Sha256,
}

impl ChecksumAlgorithm {
    const ALL: [ChecksumAlgorithm; 3] = [
        ChecksumAlgorithm::Md5,
        ChecksumAlgorithm::Sha1,
        ChecksumAlgorithm::Sha256,
    ];

    /// Canonical individual URI
    pub fn individual_uri(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "http://spdx.org/rdf/terms#checksumAlgorithm_md5",
            ChecksumAlgorithm::Sha1 => "http://spdx.org/rdf/terms#checksumAlgorithm_sha1",
            ChecksumAlgorithm::Sha256 => "http://spdx.org/rdf/terms#checksumAlgorithm_sha256",
        }
    }

    /// Expected digest length in hex characters
    pub fn hex_len(&self) -> usize {
        match self {
            ChecksumAlgorithm::Md5 => 32,
            ChecksumAlgorithm::Sha1 => 40,
            ChecksumAlgorithm::Sha256 => 64,
        }
    }
}

/// Kind of relationship between two elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    /// The source element describes the related element
    Describes,
    /// The source element contains the related element
    Contains,
    /// The source element is a build tool of the related element
    BuildToolOf,
    /// The source element depends on the related element
    DependsOn,
}

impl RelationshipType {
    const ALL: [RelationshipType; 4] = [
        RelationshipType::Describes,
        RelationshipType::Contains,
        RelationshipType::BuildToolOf,
        RelationshipType::DependsOn,
    ];

    /// Canonical individual URI
    pub fn individual_uri(&self) -> &'static str {
        match self {
            RelationshipType::Describes => "http://spdx.org/rdf/terms#relationshipType_describes",
            RelationshipType::Contains => "http://spdx.org/rdf/terms#relationshipType_contains",
            RelationshipType::BuildToolOf => {
                "http://spdx.org/rdf/terms#relationshipType_buildToolOf"
            }
            RelationshipType::DependsOn => "http://spdx.org/rdf/terms#relationshipType_dependsOn",
        }
    }
}

/// Any enumeration individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    /// An annotation type constant
    Annotation(AnnotationType),
    /// A checksum algorithm constant
    Checksum(ChecksumAlgorithm),
    /// A relationship type constant
    Relationship(RelationshipType),
}

impl EnumValue {
    /// Canonical individual URI
    pub fn individual_uri(&self) -> &'static str {
        match self {
            EnumValue::Annotation(v) => v.individual_uri(),
            EnumValue::Checksum(v) => v.individual_uri(),
            EnumValue::Relationship(v) => v.individual_uri(),
        }
    }

    /// Look a constant up by its canonical URI
    pub fn from_uri(uri: &str) -> Option<EnumValue> {
        URI_REGISTRY.get(uri).copied()
    }
}

impl From<AnnotationType> for EnumValue {
    fn from(v: AnnotationType) -> Self {
        EnumValue::Annotation(v)
    }
}

impl From<ChecksumAlgorithm> for EnumValue {
    fn from(v: ChecksumAlgorithm) -> Self {
        EnumValue::Checksum(v)
    }
}

impl From<RelationshipType> for EnumValue {
    fn from(v: RelationshipType) -> Self {
        EnumValue::Relationship(v)
    }
}

static URI_REGISTRY: Lazy<HashMap<&'static str, EnumValue>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for v in AnnotationType::ALL {
        map.insert(v.individual_uri(), EnumValue::Annotation(v));
    }
    for v in ChecksumAlgorithm::ALL {
        map.insert(v.individual_uri(), EnumValue::Checksum(v));
    }
    for v in RelationshipType::ALL {
        map.insert(v.individual_uri(), EnumValue::Relationship(v));
    }
    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_roundtrip_over_every_constant() {
        let all: Vec<EnumValue> = AnnotationType::ALL
            .into_iter()
            .map(EnumValue::from)
            .chain(ChecksumAlgorithm::ALL.into_iter().map(EnumValue::from))
            .chain(RelationshipType::ALL.into_iter().map(EnumValue::from))
            .collect();
        for v in all {
            assert_eq!(EnumValue::from_uri(v.individual_uri()), Some(v));
        }
    }

    #[test]
    fn unknown_uri_is_none() {
        assert_eq!(EnumValue::from_uri("http://spdx.org/rdf/terms#nope"), None);
        assert_eq!(EnumValue::from_uri(""), None);
    }

    #[test]
    fn digest_lengths() {
        assert_eq!(ChecksumAlgorithm::Md5.hex_len(), 32);
        assert_eq!(ChecksumAlgorithm::Sha1.hex_len(), 40);
        assert_eq!(ChecksumAlgorithm::Sha256.hex_len(), 64);
    }
}
