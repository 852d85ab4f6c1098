//! Property schemas
//!
//! Each concrete model type declares its property slots: name, expected
//! value kind, required flag and cardinality. The schema drives accessor
//! validation, `verify()`, `equivalent()`, `copy_from()` and the copy
//! manager's property walk.

use spdx_core::types::TypeTag;

/// Property name constants
pub mod prop {
    /// Annotator of an annotation
    pub const ANNOTATOR: &str = "annotator";
    /// Kind of an annotation
    pub const ANNOTATION_TYPE: &str = "annotationType";
    /// Timestamp of an annotation
    pub const ANNOTATION_DATE: &str = "annotationDate";
    /// Free-text comment (RDFS)
    pub const COMMENT: &str = "comment";
    /// Element or license name
    pub const NAME: &str = "name";
    /// Annotations attached to an element
    pub const ANNOTATION: &str = "annotation";
    /// Relationships attached to an element
    pub const RELATIONSHIP: &str = "relationship";
    /// Digest algorithm of a checksum
    pub const ALGORITHM: &str = "algorithm";
    /// Digest value of a checksum
    pub const CHECKSUM_VALUE: &str = "checksumValue";
    /// Target element of a relationship
    pub const RELATED_ELEMENT: &str = "relatedSpdxElement";
    /// Kind of a relationship
    pub const RELATIONSHIP_TYPE: &str = "relationshipType";
    /// Document specification version
    pub const SPEC_VERSION: &str = "specVersion";
    /// External document mappings held by a document
    pub const EXTERNAL_DOCUMENT_REF: &str = "externalDocumentRef";
    /// URI of the external document named by a mapping
    pub const EXTERNAL_DOCUMENT: &str = "spdxDocument";
    /// Integrity checksum of an external document mapping
    pub const CHECKSUM: &str = "checksum";
    /// License identifier
    pub const LICENSE_ID: &str = "licenseId";
    /// Full license text
    pub const LICENSE_TEXT: &str = "licenseText";
    /// Source URLs of a license (RDFS)
    pub const SEE_ALSO: &str = "seeAlso";
    /// Standard license header
    pub const STD_LICENSE_HEADER: &str = "standardLicenseHeader";
    /// Templated standard license header
    pub const STD_LICENSE_HEADER_TEMPLATE: &str = "standardLicenseHeaderTemplate";
    /// Templated license text
    pub const STD_LICENSE_TEMPLATE: &str = "standardLicenseTemplate";
    /// HTML rendering of the license text
    pub const LICENSE_TEXT_HTML: &str = "licenseTextHtml";
    /// HTML rendering of the license header
    pub const LICENSE_HEADER_HTML: &str = "licenseHeaderHtml";
    /// OSI approval flag
    pub const IS_OSI_APPROVED: &str = "isOsiApproved";
    /// FSF libre flag (tri-state: absent means unknown)
    pub const IS_FSF_LIBRE: &str = "isFsfLibre";
    /// Deprecation flag of a listed license id
    pub const IS_DEPRECATED: &str = "isDeprecatedLicenseId";
    /// Version in which the license id was deprecated
    pub const DEPRECATED_VERSION: &str = "deprecatedVersion";
    /// Cross-reference records of a listed license
    pub const CROSS_REF: &str = "crossRef";
    /// Text extracted for a user-defined license
    pub const EXTRACTED_TEXT: &str = "extractedText";
    /// URL of a cross-reference record
    pub const URL: &str = "url";
    /// Whether the cross-referenced URL is live
    pub const IS_LIVE: &str = "isLive";
    /// Whether the URL points at a wayback archive
    pub const IS_WAYBACK_LINK: &str = "isWayBackLink";
    /// Whether the URL is valid
    pub const IS_VALID: &str = "isValid";
    /// Match indicator of a cross-reference check
    pub const MATCH: &str = "match";
    /// Timestamp of a cross-reference check
    pub const TIMESTAMP: &str = "timestamp";
    /// Ordering index of a cross-reference record
    pub const ORDER: &str = "order";
}

/// Expected kind of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// String literal
    Str,
    /// Boolean literal
    Bool,
    /// Integer literal
    Int,
    /// Owned sub-object of one specific type
    Object(TypeTag),
    /// Any enumeration individual
    Individual,
    /// Any element: generic element, document, or an external element
    /// reference carried by URI
    Element,
}

/// Cardinality of a property slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one value
    Single,
    /// Ordered sequence, positional equality
    Ordered,
    /// Unordered set, equality under element matching
    Unordered,
}

/// Declared shape of one property slot
#[derive(Debug, Clone, Copy)]
pub struct PropertySchema {
    /// Property name
    pub name: &'static str,
    /// Expected value kind
    pub kind: ValueKind,
    /// Whether `verify()` reports the property when absent
    pub required: bool,
    /// Single-valued or collection
    pub cardinality: Cardinality,
}

const fn single(name: &'static str, kind: ValueKind, required: bool) -> PropertySchema {
    PropertySchema {
        name,
        kind,
        required,
        cardinality: Cardinality::Single,
    }
}

const fn unordered(name: &'static str, kind: ValueKind) -> PropertySchema {
    PropertySchema {
        name,
        kind,
        required: false,
        cardinality: Cardinality::Unordered,
    }
}

static ANNOTATION: [PropertySchema; 4] = [
    single(prop::ANNOTATOR, ValueKind::Str, true),
    single(prop::ANNOTATION_TYPE, ValueKind::Individual, true),
    single(prop::ANNOTATION_DATE, ValueKind::Str, true),
    single(prop::COMMENT, ValueKind::Str, true),
];

static CHECKSUM: [PropertySchema; 2] = [
    single(prop::ALGORITHM, ValueKind::Individual, true),
    single(prop::CHECKSUM_VALUE, ValueKind::Str, true),
];

static RELATIONSHIP: [PropertySchema; 3] = [
    single(prop::RELATED_ELEMENT, ValueKind::Element, true),
    single(prop::RELATIONSHIP_TYPE, ValueKind::Individual, true),
    single(prop::COMMENT, ValueKind::Str, false),
];

static GENERIC_ELEMENT: [PropertySchema; 4] = [
    single(prop::NAME, ValueKind::Str, false),
    single(prop::COMMENT, ValueKind::Str, false),
    unordered(prop::ANNOTATION, ValueKind::Object(TypeTag::Annotation)),
    unordered(prop::RELATIONSHIP, ValueKind::Object(TypeTag::Relationship)),
];

static SPDX_DOCUMENT: [PropertySchema; 5] = [
    single(prop::SPEC_VERSION, ValueKind::Str, true),
    single(prop::NAME, ValueKind::Str, true),
    unordered(
        prop::EXTERNAL_DOCUMENT_REF,
        ValueKind::Object(TypeTag::ExternalDocumentRef),
    ),
    unordered(prop::ANNOTATION, ValueKind::Object(TypeTag::Annotation)),
    unordered(prop::RELATIONSHIP, ValueKind::Object(TypeTag::Relationship)),
];

static EXTERNAL_DOCUMENT_REF: [PropertySchema; 2] = [
    single(prop::EXTERNAL_DOCUMENT, ValueKind::Str, true),
    single(
        prop::CHECKSUM,
        ValueKind::Object(TypeTag::Checksum),
        true,
    ),
];

static LISTED_LICENSE: [PropertySchema; 15] = [
    single(prop::LICENSE_ID, ValueKind::Str, true),
    single(prop::LICENSE_TEXT, ValueKind::Str, true),
    single(prop::NAME, ValueKind::Str, false),
    single(prop::COMMENT, ValueKind::Str, false),
    single(prop::STD_LICENSE_HEADER, ValueKind::Str, false),
    single(prop::STD_LICENSE_HEADER_TEMPLATE, ValueKind::Str, false),
    single(prop::STD_LICENSE_TEMPLATE, ValueKind::Str, false),
    single(prop::LICENSE_TEXT_HTML, ValueKind::Str, false),
    single(prop::LICENSE_HEADER_HTML, ValueKind::Str, false),
    single(prop::IS_OSI_APPROVED, ValueKind::Bool, false),
    single(prop::IS_FSF_LIBRE, ValueKind::Bool, false),
    single(prop::IS_DEPRECATED, ValueKind::Bool, false),
    single(prop::DEPRECATED_VERSION, ValueKind::Str, false),
    unordered(prop::SEE_ALSO, ValueKind::Str),
    unordered(prop::CROSS_REF, ValueKind::Object(TypeTag::CrossRef)),
];

static EXTRACTED_LICENSE: [PropertySchema; 4] = [
    single(prop::EXTRACTED_TEXT, ValueKind::Str, true),
    single(prop::NAME, ValueKind::Str, false),
    single(prop::COMMENT, ValueKind::Str, false),
    unordered(prop::SEE_ALSO, ValueKind::Str),
];

static CROSS_REF: [PropertySchema; 7] = [
    single(prop::URL, ValueKind::Str, true),
    single(prop::IS_LIVE, ValueKind::Bool, false),
    single(prop::IS_WAYBACK_LINK, ValueKind::Bool, false),
    single(prop::IS_VALID, ValueKind::Bool, false),
    single(prop::MATCH, ValueKind::Str, false),
    single(prop::TIMESTAMP, ValueKind::Str, false),
    single(prop::ORDER, ValueKind::Int, false),
];

/// The declared property schema of a concrete model type
pub fn schema_of(tag: TypeTag) -> &'static [PropertySchema] {
    match tag {
        TypeTag::Annotation => &ANNOTATION,
        TypeTag::Checksum => &CHECKSUM,
        TypeTag::Relationship => &RELATIONSHIP,
        TypeTag::GenericElement => &GENERIC_ELEMENT,
        TypeTag::SpdxDocument => &SPDX_DOCUMENT,
        TypeTag::ExternalDocumentRef => &EXTERNAL_DOCUMENT_REF,
        TypeTag::ListedLicense => &LISTED_LICENSE,
        TypeTag::ExtractedLicense => &EXTRACTED_LICENSE,
        TypeTag::CrossRef => &CROSS_REF,
    }
}

/// Look up one property's declared schema on a type
pub fn property_schema(tag: TypeTag, name: &str) -> Option<&'static PropertySchema> {
    schema_of(tag).iter().find(|p| p.name == name)
}
