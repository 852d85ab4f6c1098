//! Documents
//!
//! A document is the identifier-namespace scope everything else lives in.
//! Each (store, document URI) pair holds exactly one document object,
//! always at [`DOCUMENT_ID`].

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;

use crate::annotation::Annotation;
use crate::checksum::Checksum;
use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::external::ExternalDocumentRef;
use crate::object::{ModelCollection, ModelObject};
use crate::relationship::Relationship;
use crate::schema::prop;

/// The one well-known identifier a document object lives at
pub const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";

/// Specification version written by [`SpdxDocument::create`]
pub const CURRENT_SPEC_VERSION: &str = "SPDX-2.3";

/// The document object of a (store, document URI) pair
#[derive(Debug, Clone, PartialEq)]
pub struct SpdxDocument(ModelObject);

impl SpdxDocument {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::SpdxDocument;

    /// Create the document object for `ctx`'s document URI, or bind to it
    /// if it already exists
    ///
    /// A freshly created document gets [`CURRENT_SPEC_VERSION`]; an
    /// existing one is left untouched.
    pub fn create(ctx: &ModelContext) -> Result<SpdxDocument> {
        let fresh = !ctx.store().exists(ctx.document_uri(), DOCUMENT_ID)?;
        let obj = ModelObject::with_id(ctx, DOCUMENT_ID, Self::TYPE, true)?;
        if fresh {
            obj.set_property(prop::SPEC_VERSION, ModelValue::from(CURRENT_SPEC_VERSION))?;
        }
        Ok(SpdxDocument(obj))
    }

    /// Bind to an existing document object
    pub fn bind(ctx: &ModelContext) -> Result<SpdxDocument> {
        Ok(SpdxDocument(ModelObject::with_id(
            ctx,
            DOCUMENT_ID,
            Self::TYPE,
            false,
        )?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<SpdxDocument> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(SpdxDocument(obj))
    }

    /// Always [`DOCUMENT_ID`]
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// The specification version of this document
    pub fn spec_version(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::SPEC_VERSION)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the specification version
    pub fn set_spec_version(&self, version: &str) -> Result<()> {
        self.0.set_property(prop::SPEC_VERSION, ModelValue::from(version))
    }

    /// The document's name
    pub fn name(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::NAME)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the document's name
    pub fn set_name(&self, name: &str) -> Result<()> {
        self.0.set_property(prop::NAME, ModelValue::from(name))
    }

    /// External document mappings held by this document
    pub fn external_document_refs(&self) -> Result<ModelCollection> {
        self.0.collection(prop::EXTERNAL_DOCUMENT_REF)
    }

    /// Create an external document mapping and attach it
    ///
    /// Allocates a fresh `DocumentRef-` id for the mapping.
    pub fn add_external_document_ref(
        &self,
        external_document_uri: &str,
        checksum: &Checksum,
    ) -> Result<ExternalDocumentRef> {
        let ctx = self.0.context();
        let id = ctx
            .store()
            .next_id(spdx_core::types::IdType::DocumentRef, ctx.document_uri())?;
        let mapping = ExternalDocumentRef::new(ctx, &id, external_document_uri, checksum)?;
        self.external_document_refs()?
            .add(ModelValue::Object(mapping.as_model().clone()))?;
        Ok(mapping)
    }

    /// Look up an external document mapping by its `DocumentRef-` id
    pub fn external_document_ref(&self, id: &str) -> Result<Option<ExternalDocumentRef>> {
        for value in self.external_document_refs()?.values()? {
            if let ModelValue::Object(obj) = value {
                if obj.id() == id {
                    return Ok(Some(ExternalDocumentRef::from_model_unchecked(obj)));
                }
            }
        }
        Ok(None)
    }

    /// The document's annotations
    pub fn annotations(&self) -> Result<ModelCollection> {
        self.0.collection(prop::ANNOTATION)
    }

    /// Attach an annotation
    pub fn add_annotation(&self, annotation: &Annotation) -> Result<()> {
        self.annotations()?
            .add(ModelValue::Object(annotation.as_model().clone()))
    }

    /// The document's relationships
    pub fn relationships(&self) -> Result<ModelCollection> {
        self.0.collection(prop::RELATIONSHIP)
    }

    /// Attach a relationship
    pub fn add_relationship(&self, relationship: &Relationship) -> Result<()> {
        self.relationships()?
            .add(ModelValue::Object(relationship.as_model().clone()))
    }

    /// Diagnostics for this document and everything reachable from it
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// Structural equivalence; see [`ModelObject::equivalent`]
    pub fn equivalent(&self, other: &SpdxDocument) -> Result<bool> {
        self.0.equivalent(&other.0)
    }

    /// Replace this document's state with `source`'s; see
    /// [`ModelObject::copy_from`]
    pub fn copy_from(&self, source: &SpdxDocument) -> Result<()> {
        self.0.copy_from(&source.0)
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<SpdxDocument> for ModelObject {
    fn from(d: SpdxDocument) -> Self {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyManager;
    use crate::enums::ChecksumAlgorithm;
    use spdx_core::types::DocumentUri;
    use spdx_storage::InMemStore;
    use std::sync::Arc;

    const SHA1: &str = "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12";

    fn ctx() -> ModelContext {
        ModelContext::new(
            Arc::new(InMemStore::new()),
            DocumentUri::new("http://test.document.uri/1"),
            CopyManager::new(),
        )
    }

    #[test]
    fn create_pins_the_well_known_id_and_version() {
        let ctx = ctx();
        let doc = SpdxDocument::create(&ctx).unwrap();
        assert_eq!(doc.id(), DOCUMENT_ID);
        assert_eq!(
            doc.spec_version().unwrap().as_deref(),
            Some(CURRENT_SPEC_VERSION)
        );
    }

    #[test]
    fn create_twice_binds_without_clobbering() {
        let ctx = ctx();
        let doc = SpdxDocument::create(&ctx).unwrap();
        doc.set_spec_version("SPDX-2.2").unwrap();
        let again = SpdxDocument::create(&ctx).unwrap();
        assert_eq!(again.spec_version().unwrap().as_deref(), Some("SPDX-2.2"));
        assert_eq!(doc, again);
    }

    #[test]
    fn verify_requires_a_name() {
        let ctx = ctx();
        let doc = SpdxDocument::create(&ctx).unwrap();
        let issues = doc.verify();
        assert_eq!(issues.len(), 1, "{issues:?}");
        doc.set_name("my sbom").unwrap();
        assert!(doc.verify().is_empty());
    }

    #[test]
    fn external_document_ref_round_trip() {
        let ctx = ctx();
        let doc = SpdxDocument::create(&ctx).unwrap();
        doc.set_name("doc").unwrap();
        let checksum = Checksum::new(&ctx, ChecksumAlgorithm::Sha1, SHA1).unwrap();
        let mapping = doc
            .add_external_document_ref("http://other.document", &checksum)
            .unwrap();
        assert!(mapping.id().starts_with("DocumentRef-"));
        let found = doc.external_document_ref(mapping.id()).unwrap().unwrap();
        assert_eq!(
            found.external_document_uri().unwrap().as_deref(),
            Some("http://other.document")
        );
        assert_eq!(
            found.checksum().unwrap().unwrap().checksum_value().unwrap().as_deref(),
            Some(SHA1)
        );
        let ext = found.external_element("SPDXRef-7").unwrap();
        assert_eq!(ext.individual_uri(), "http://other.document#SPDXRef-7");
        assert!(doc.verify().is_empty());
        assert!(doc.external_document_ref("DocumentRef-nope").unwrap().is_none());
    }
}
