//! Licenses
//!
//! Two license shapes: [`ListedLicense`], keyed by its stable registry id
//! and carrying the full catalog property set, and [`ExtractedLicense`],
//! a user-supplied license under a `LicenseRef-` id. Listed licenses hold
//! [`CrossRef`] records built through [`CrossRefBuilder`].

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;
use spdx_core::vocab;

use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::object::{ModelCollection, ModelObject};
use crate::schema::prop;

macro_rules! string_accessors {
    ($(#[$get_doc:meta] $getter:ident, #[$set_doc:meta] $setter:ident, $prop:expr;)+) => {
        $(
            #[$get_doc]
            pub fn $getter(&self) -> Result<Option<String>> {
                Ok(self
                    .0
                    .get_property($prop)?
                    .and_then(|v| v.as_str().map(str::to_string)))
            }

            #[$set_doc]
            pub fn $setter(&self, value: &str) -> Result<()> {
                self.0.set_property($prop, ModelValue::from(value))
            }
        )+
    };
}

macro_rules! bool_accessors {
    ($(#[$get_doc:meta] $getter:ident, #[$set_doc:meta] $setter:ident, $prop:expr;)+) => {
        $(
            #[$get_doc]
            pub fn $getter(&self) -> Result<Option<bool>> {
                Ok(self.0.get_property($prop)?.and_then(|v| v.as_bool()))
            }

            #[$set_doc]
            pub fn $setter(&self, value: bool) -> Result<()> {
                self.0.set_property($prop, ModelValue::Bool(value))
            }
        )+
    };
}

/// A license from the published registry
///
/// Created under its registry id (`Apache-2.0`, `MIT`, ...). The id is
/// stable across stores and documents: copies keep it instead of
/// allocating a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedLicense(ModelObject);

impl ListedLicense {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::ListedLicense;

    /// Create a listed license under its registry id
    ///
    /// The id must come from the registry; anything else belongs in an
    /// [`ExtractedLicense`].
    pub fn new(ctx: &ModelContext, license_id: &str, license_text: &str) -> Result<ListedLicense> {
        Self::check_registry(license_id)?;
        let obj = ModelObject::with_id(ctx, license_id, Self::TYPE, true)?;
        obj.set_property(prop::LICENSE_ID, ModelValue::from(license_id))?;
        obj.set_property(prop::LICENSE_TEXT, ModelValue::from(license_text))?;
        Ok(ListedLicense(obj))
    }

    /// Bind to an existing listed license
    pub fn bind(ctx: &ModelContext, license_id: &str) -> Result<ListedLicense> {
        Self::check_registry(license_id)?;
        Ok(ListedLicense(ModelObject::with_id(
            ctx,
            license_id,
            Self::TYPE,
            false,
        )?))
    }

    fn check_registry(license_id: &str) -> Result<()> {
        if !vocab::is_listed_license_id(license_id) {
            return Err(SpdxError::InvalidId(format!(
                "{license_id} is not on the listed license registry"
            )));
        }
        Ok(())
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<ListedLicense> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(ListedLicense(obj))
    }

    /// The registry id this license lives at
    pub fn id(&self) -> &str {
        self.0.id()
    }

    string_accessors! {
        /// The stored licenseId property
        license_id,
        /// Set the stored licenseId property
        set_license_id, prop::LICENSE_ID;
        /// Full license text
        license_text,
        /// Set the full license text
        set_license_text, prop::LICENSE_TEXT;
        /// Human-readable license name
        name,
        /// Set the human-readable license name
        set_name, prop::NAME;
        /// Free-text comment
        comment,
        /// Set the free-text comment
        set_comment, prop::COMMENT;
        /// Standard license header
        standard_license_header,
        /// Set the standard license header
        set_standard_license_header, prop::STD_LICENSE_HEADER;
        /// Templated standard license header
        standard_license_header_template,
        /// Set the templated standard license header
        set_standard_license_header_template, prop::STD_LICENSE_HEADER_TEMPLATE;
        /// Templated license text
        standard_license_template,
        /// Set the templated license text
        set_standard_license_template, prop::STD_LICENSE_TEMPLATE;
        /// HTML rendering of the license text
        license_text_html,
        /// Set the HTML rendering of the license text
        set_license_text_html, prop::LICENSE_TEXT_HTML;
        /// HTML rendering of the license header
        license_header_html,
        /// Set the HTML rendering of the license header
        set_license_header_html, prop::LICENSE_HEADER_HTML;
        /// Version in which this license id was deprecated
        deprecated_version,
        /// Set the version in which this license id was deprecated
        set_deprecated_version, prop::DEPRECATED_VERSION;
    }

    bool_accessors! {
        /// Whether the license is OSI approved
        is_osi_approved,
        /// Set whether the license is OSI approved
        set_osi_approved, prop::IS_OSI_APPROVED;
        /// Whether the license is FSF libre; absent means unknown
        is_fsf_libre,
        /// Set whether the license is FSF libre
        set_fsf_libre, prop::IS_FSF_LIBRE;
        /// Whether this license id is deprecated
        is_deprecated,
        /// Set whether this license id is deprecated
        set_deprecated, prop::IS_DEPRECATED;
    }

    /// Source URLs of this license
    pub fn see_also(&self) -> Result<ModelCollection> {
        self.0.collection(prop::SEE_ALSO)
    }

    /// Cross-reference records of this license
    pub fn cross_refs(&self) -> Result<Vec<CrossRef>> {
        let mut out = Vec::new();
        for value in self.0.collection(prop::CROSS_REF)?.values()? {
            if let ModelValue::Object(obj) = value {
                out.push(CrossRef(obj));
            }
        }
        Ok(out)
    }

    /// Start building a cross-reference record for `url`
    ///
    /// The record is created and attached when the builder's `build` runs.
    pub fn create_cross_ref(&self, url: &str) -> CrossRefBuilder {
        CrossRefBuilder::new(self).url(url)
    }

    /// Diagnostics for this license and its cross-references
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// Structural equivalence; see [`ModelObject::equivalent`]
    pub fn equivalent(&self, other: &ListedLicense) -> Result<bool> {
        self.0.equivalent(&other.0)
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<ListedLicense> for ModelObject {
    fn from(l: ListedLicense) -> Self {
        l.0
    }
}

/// A license extracted from the analyzed content rather than the registry
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLicense(ModelObject);

impl ExtractedLicense {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::ExtractedLicense;

    /// Create an extracted license under a fresh `LicenseRef-` id
    pub fn new(ctx: &ModelContext, extracted_text: &str) -> Result<ExtractedLicense> {
        let obj = ModelObject::new(ctx, Self::TYPE)?;
        obj.set_property(prop::EXTRACTED_TEXT, ModelValue::from(extracted_text))?;
        Ok(ExtractedLicense(obj))
    }

    /// Create or bind an extracted license at a caller-chosen
    /// `LicenseRef-` id
    pub fn with_id(ctx: &ModelContext, id: &str, create: bool) -> Result<ExtractedLicense> {
        Ok(ExtractedLicense(ModelObject::with_id(
            ctx,
            id,
            Self::TYPE,
            create,
        )?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<ExtractedLicense> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(ExtractedLicense(obj))
    }

    /// This license's `LicenseRef-` identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    string_accessors! {
        /// The text this license was extracted from
        extracted_text,
        /// Set the extracted text
        set_extracted_text, prop::EXTRACTED_TEXT;
        /// Human-readable license name
        name,
        /// Set the human-readable license name
        set_name, prop::NAME;
        /// Free-text comment
        comment,
        /// Set the free-text comment
        set_comment, prop::COMMENT;
    }

    /// Source URLs of this license
    pub fn see_also(&self) -> Result<ModelCollection> {
        self.0.collection(prop::SEE_ALSO)
    }

    /// Diagnostics for this license
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// Structural equivalence; see [`ModelObject::equivalent`]
    pub fn equivalent(&self, other: &ExtractedLicense) -> Result<bool> {
        self.0.equivalent(&other.0)
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<ExtractedLicense> for ModelObject {
    fn from(l: ExtractedLicense) -> Self {
        l.0
    }
}

/// One cross-reference record of a listed license
#[derive(Debug, Clone, PartialEq)]
pub struct CrossRef(ModelObject);

impl CrossRef {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::CrossRef;

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<CrossRef> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(CrossRef(obj))
    }

    /// This record's identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    string_accessors! {
        /// The cross-referenced URL
        url,
        /// Set the cross-referenced URL
        set_url, prop::URL;
        /// Match indicator reported by the checker
        match_value,
        /// Set the match indicator
        set_match_value, prop::MATCH;
        /// When the URL was last checked
        timestamp,
        /// Set when the URL was last checked
        set_timestamp, prop::TIMESTAMP;
    }

    bool_accessors! {
        /// Whether the URL was live when checked
        is_live,
        /// Set whether the URL was live
        set_live, prop::IS_LIVE;
        /// Whether the URL points at a wayback archive
        is_wayback_link,
        /// Set whether the URL points at a wayback archive
        set_wayback_link, prop::IS_WAYBACK_LINK;
        /// Whether the URL is valid
        is_valid,
        /// Set whether the URL is valid
        set_valid, prop::IS_VALID;
    }

    /// Ordering index within the license's record list
    pub fn order(&self) -> Result<Option<i64>> {
        Ok(self.0.get_property(prop::ORDER)?.and_then(|v| v.as_int()))
    }

    /// Set the ordering index
    pub fn set_order(&self, order: i64) -> Result<()> {
        self.0.set_property(prop::ORDER, ModelValue::Int(order))
    }

    /// Diagnostics for this record
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<CrossRef> for ModelObject {
    fn from(c: CrossRef) -> Self {
        c.0
    }
}

/// Accumulates cross-reference fields, then creates and attaches the
/// record in one step
///
/// Nothing touches the store until [`CrossRefBuilder::build`]; a missing
/// URL fails there with `MissingRequiredField`.
#[derive(Debug)]
pub struct CrossRefBuilder {
    license: ModelObject,
    url: Option<String>,
    is_live: Option<bool>,
    is_wayback_link: Option<bool>,
    is_valid: Option<bool>,
    match_value: Option<String>,
    timestamp: Option<String>,
    order: Option<i64>,
}

impl CrossRefBuilder {
    /// Start an empty builder attached to `license`
    pub fn new(license: &ListedLicense) -> CrossRefBuilder {
        CrossRefBuilder {
            license: license.as_model().clone(),
            url: None,
            is_live: None,
            is_wayback_link: None,
            is_valid: None,
            match_value: None,
            timestamp: None,
            order: None,
        }
    }

    /// The cross-referenced URL (required)
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Whether the URL was live when checked
    pub fn live(mut self, live: bool) -> Self {
        self.is_live = Some(live);
        self
    }

    /// Whether the URL points at a wayback archive
    pub fn wayback_link(mut self, wayback: bool) -> Self {
        self.is_wayback_link = Some(wayback);
        self
    }

    /// Whether the URL is valid
    pub fn valid(mut self, valid: bool) -> Self {
        self.is_valid = Some(valid);
        self
    }

    /// Match indicator reported by the checker
    pub fn match_value(mut self, m: &str) -> Self {
        self.match_value = Some(m.to_string());
        self
    }

    /// When the URL was last checked
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    /// Ordering index within the license's record list
    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Create the record, write its fields and attach it to the license
    pub fn build(self) -> Result<CrossRef> {
        let url = self.url.ok_or(SpdxError::MissingRequiredField("url"))?;
        let ctx = self.license.context();
        let obj = ModelObject::new(ctx, TypeTag::CrossRef)?;
        obj.set_property(prop::URL, ModelValue::from(url))?;
        if let Some(v) = self.is_live {
            obj.set_property(prop::IS_LIVE, ModelValue::Bool(v))?;
        }
        if let Some(v) = self.is_wayback_link {
            obj.set_property(prop::IS_WAYBACK_LINK, ModelValue::Bool(v))?;
        }
        if let Some(v) = self.is_valid {
            obj.set_property(prop::IS_VALID, ModelValue::Bool(v))?;
        }
        if let Some(v) = self.match_value {
            obj.set_property(prop::MATCH, ModelValue::from(v))?;
        }
        if let Some(v) = self.timestamp {
            obj.set_property(prop::TIMESTAMP, ModelValue::from(v))?;
        }
        if let Some(v) = self.order {
            obj.set_property(prop::ORDER, ModelValue::Int(v))?;
        }
        self.license
            .collection(prop::CROSS_REF)?
            .add(ModelValue::Object(obj.clone()))?;
        Ok(CrossRef(obj))
    }
}
