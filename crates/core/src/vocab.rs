//! Resource / namespace factory
//!
//! Maps symbolic type and property names to fully-qualified vocabulary URIs
//! and back. Type resolution checks the DOAP and pointer catalogs before
//! falling back to the primary SPDX vocabulary; property resolution checks
//! RDF, RDFS, DOAP, OWL and pointer catalogs in that order. The catalog
//! orders differ because some names are shared across vocabularies.
//!
//! The inverse operation only recognizes absolute resource URIs and reports
//! "no match" for anything outside the known prefixes, emitting a warning
//! rather than failing.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::warn;

/// Primary SPDX vocabulary namespace
pub const SPDX_NAMESPACE: &str = "http://spdx.org/rdf/terms#";
/// Core relational vocabulary namespace
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Descriptive metadata vocabulary namespace
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// Project-description vocabulary namespace
pub const DOAP_NAMESPACE: &str = "http://usefulinc.com/ns/doap#";
/// Ontology vocabulary namespace
pub const OWL_NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
/// Pointer/range vocabulary namespace
pub const POINTER_NAMESPACE: &str = "http://www.w3.org/2009/pointers#";

/// Prefix of document-local element identifiers
pub const SPDX_ID_PREFIX: &str = "SPDXRef-";
/// Prefix of license-reference identifiers
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";
/// Prefix of external-document-reference identifiers
pub const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";
/// URL prefix under which listed licenses are published
pub const LISTED_LICENSE_URL: &str = "https://spdx.org/licenses/";

static DOAP_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| ["Project"].into_iter().collect());

static POINTER_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "StartEndPointer",
        "ByteOffsetPointer",
        "LineCharPointer",
        "CompoundPointer",
        "SinglePointer",
    ]
    .into_iter()
    .collect()
});

static RDF_PROPERTIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["type", "resource"].into_iter().collect());

static RDFS_PROPERTIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["comment", "label", "seeAlso"].into_iter().collect());

static DOAP_PROPERTIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["homepage"].into_iter().collect());

static OWL_PROPERTIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["sameAs"].into_iter().collect());

static POINTER_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["startPointer", "endPointer", "reference", "offset", "lineNumber"]
        .into_iter()
        .collect()
});

/// The listed-license registry
///
/// A closed, externally supplied catalog; this layer never allocates
/// identifiers from it. Kept as static data.
static LISTED_LICENSE_IDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "0BSD",
        "AFL-3.0",
        "Apache-2.0",
        "BSD-2-Clause",
        "BSD-3-Clause",
        "CC0-1.0",
        "EPL-2.0",
        "GPL-2.0-only",
        "GPL-3.0-only",
        "ISC",
        "LGPL-2.1-only",
        "LGPL-3.0-only",
        "MIT",
        "MPL-2.0",
        "Unlicense",
        "Zlib",
    ]
    .into_iter()
    .collect()
});

/// Whether `id` is on the listed-license registry
pub fn is_listed_license_id(id: &str) -> bool {
    LISTED_LICENSE_IDS.contains(id)
}

/// Resolve a symbolic type name to its vocabulary URI
///
/// Checks the DOAP and pointer type catalogs in that order, falling back
/// to the primary SPDX vocabulary for anything else.
pub fn type_to_resource(type_name: &str) -> String {
    if DOAP_TYPES.contains(type_name) {
        format!("{DOAP_NAMESPACE}{type_name}")
    } else if POINTER_TYPES.contains(type_name) {
        format!("{POINTER_NAMESPACE}{type_name}")
    } else {
        format!("{SPDX_NAMESPACE}{type_name}")
    }
}

/// Resolve a symbolic property name to its vocabulary URI
///
/// Checks the RDF, RDFS, DOAP, OWL and pointer property catalogs in that
/// order, falling back to the primary SPDX vocabulary.
pub fn property_name_to_uri(property_name: &str) -> String {
    if RDF_PROPERTIES.contains(property_name) {
        format!("{RDF_NAMESPACE}{property_name}")
    } else if RDFS_PROPERTIES.contains(property_name) {
        format!("{RDFS_NAMESPACE}{property_name}")
    } else if DOAP_PROPERTIES.contains(property_name) {
        format!("{DOAP_NAMESPACE}{property_name}")
    } else if OWL_PROPERTIES.contains(property_name) {
        format!("{OWL_NAMESPACE}{property_name}")
    } else if POINTER_PROPERTIES.contains(property_name) {
        format!("{POINTER_NAMESPACE}{property_name}")
    } else {
        format!("{SPDX_NAMESPACE}{property_name}")
    }
}

/// Convert a type resource URI back to its symbolic type name
///
/// The URI must be an absolute resource (a literal never matches). The
/// longest matching known vocabulary prefix is stripped, trying the DOAP,
/// pointer and primary namespaces in that order. Returns None and warns
/// when no known prefix matches; never fails.
pub fn resource_to_spdx_type(uri: &str) -> Option<String> {
    if !uri.contains("://") {
        return None;
    }
    if let Some(rest) = uri.strip_prefix(DOAP_NAMESPACE) {
        return Some(rest.to_string());
    }
    if let Some(rest) = uri.strip_prefix(POINTER_NAMESPACE) {
        return Some(rest.to_string());
    }
    if let Some(rest) = uri.strip_prefix(SPDX_NAMESPACE) {
        return Some(rest.to_string());
    }
    warn!(uri, "unknown resource type");
    None
}
