//! External references
//!
//! Two pieces: [`ExternalElement`], a by-URI reference to an element in a
//! different document (never copied by value), and
//! [`ExternalDocumentRef`], the stored mapping from a `DocumentRef-` id to
//! an external document's URI and integrity checksum.

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::{valid_id_suffix, DocumentUri, TypeTag};
use spdx_core::vocab;

use crate::checksum::Checksum;
use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::object::ModelObject;
use crate::schema::prop;

/// Reference to an element living in a different document
///
/// Carried by its URI `<externalDocumentUri>#<localId>` only; the
/// referent is never followed or duplicated by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalElement {
    external_document_uri: DocumentUri,
    local_id: String,
}

impl ExternalElement {
    /// Create a reference to `local_id` inside `external_document_uri`
    ///
    /// The local id must be a well-formed `SPDXRef-` identifier.
    pub fn new(external_document_uri: DocumentUri, local_id: impl Into<String>) -> Result<Self> {
        let local_id = local_id.into();
        let suffix = local_id
            .strip_prefix(vocab::SPDX_ID_PREFIX)
            .ok_or_else(|| SpdxError::InvalidId(local_id.clone()))?;
        if !valid_id_suffix(suffix) {
            return Err(SpdxError::InvalidId(local_id));
        }
        Ok(Self {
            external_document_uri,
            local_id,
        })
    }

    /// Parse an external element reference from its URI
    ///
    /// The URI must look like `<absolute document uri>#SPDXRef-<suffix>`.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let (document, fragment) = uri
            .split_once('#')
            .ok_or_else(|| SpdxError::UnresolvableUri(uri.to_string()))?;
        if !document.contains("://") {
            return Err(SpdxError::UnresolvableUri(uri.to_string()));
        }
        Self::new(DocumentUri::new(document), fragment)
            .map_err(|_| SpdxError::UnresolvableUri(uri.to_string()))
    }

    /// The document the referent lives in
    pub fn external_document_uri(&self) -> &DocumentUri {
        &self.external_document_uri
    }

    /// The referent's identifier local to its own document
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// The canonical URI carrying this reference
    pub fn individual_uri(&self) -> String {
        format!("{}#{}", self.external_document_uri, self.local_id)
    }
}

/// Mapping from a `DocumentRef-` id to an external document
///
/// Held by the owning document's `externalDocumentRef` collection; pairs
/// the external document's URI with an integrity checksum.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDocumentRef(ModelObject);

impl ExternalDocumentRef {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::ExternalDocumentRef;

    /// Create a mapping under `id` (a `DocumentRef-` identifier)
    pub fn new(
        ctx: &ModelContext,
        id: &str,
        external_document_uri: &str,
        checksum: &Checksum,
    ) -> Result<Self> {
        let obj = ModelObject::with_id(ctx, id, Self::TYPE, true)?;
        obj.set_property(
            prop::EXTERNAL_DOCUMENT,
            ModelValue::from(external_document_uri),
        )?;
        obj.set_property(
            prop::CHECKSUM,
            ModelValue::Object(checksum.as_model().clone()),
        )?;
        Ok(Self(obj))
    }

    /// Bind to an existing mapping
    pub fn bind(ctx: &ModelContext, id: &str) -> Result<Self> {
        Ok(Self(ModelObject::with_id(ctx, id, Self::TYPE, false)?))
    }

    /// Wrap an object a typed collection read already tag-checked
    pub(crate) fn from_model_unchecked(obj: ModelObject) -> Self {
        debug_assert_eq!(obj.type_tag(), Self::TYPE);
        Self(obj)
    }

    /// The mapping's own identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// URI of the external document
    pub fn external_document_uri(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::EXTERNAL_DOCUMENT)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Integrity checksum of the external document
    pub fn checksum(&self) -> Result<Option<Checksum>> {
        match self.0.get_property(prop::CHECKSUM)? {
            Some(ModelValue::Object(obj)) => Ok(Some(Checksum::from_model(obj)?)),
            _ => Ok(None),
        }
    }

    /// Reference an element inside the mapped document
    pub fn external_element(&self, local_id: &str) -> Result<ExternalElement> {
        let uri = self.external_document_uri()?.ok_or_else(|| {
            SpdxError::SourceMissing {
                document: self.0.context().document_uri().to_string(),
                id: self.id().to_string(),
            }
        })?;
        ExternalElement::new(DocumentUri::new(uri), local_id)
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<ExternalDocumentRef> for ModelObject {
    fn from(r: ExternalDocumentRef) -> Self {
        r.0
    }
}
