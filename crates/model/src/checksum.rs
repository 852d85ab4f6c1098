//! Checksums

use spdx_core::error::{Result, SpdxError};
use spdx_core::types::TypeTag;

use crate::context::ModelContext;
use crate::convert::ModelValue;
use crate::enums::{ChecksumAlgorithm, EnumValue};
use crate::object::ModelObject;
use crate::schema::prop;

/// A digest over some content: algorithm plus hex digest value
#[derive(Debug, Clone, PartialEq)]
pub struct Checksum(ModelObject);

impl Checksum {
    /// Concrete type tag
    pub const TYPE: TypeTag = TypeTag::Checksum;

    /// Create a checksum under a fresh anonymous id
    ///
    /// The value is stored as given; length and hex-ness are reported by
    /// `verify`, not enforced here.
    pub fn new(ctx: &ModelContext, algorithm: ChecksumAlgorithm, value: &str) -> Result<Checksum> {
        let obj = ModelObject::new(ctx, Self::TYPE)?;
        obj.set_property(prop::ALGORITHM, ModelValue::Enum(algorithm.into()))?;
        obj.set_property(prop::CHECKSUM_VALUE, ModelValue::from(value))?;
        Ok(Checksum(obj))
    }

    /// Bind to an existing checksum
    pub fn bind(ctx: &ModelContext, id: &str) -> Result<Checksum> {
        Ok(Checksum(ModelObject::with_id(ctx, id, Self::TYPE, false)?))
    }

    /// Wrap an already-bound model object, checking its type
    pub fn from_model(obj: ModelObject) -> Result<Checksum> {
        if obj.type_tag() != Self::TYPE {
            return Err(SpdxError::TypeMismatch {
                id: obj.id().to_string(),
                expected: Self::TYPE,
                found: obj.type_tag(),
            });
        }
        Ok(Checksum(obj))
    }

    /// This checksum's identifier
    pub fn id(&self) -> &str {
        self.0.id()
    }

    /// The digest algorithm
    pub fn algorithm(&self) -> Result<Option<ChecksumAlgorithm>> {
        Ok(match self.0.get_property(prop::ALGORITHM)? {
            Some(ModelValue::Enum(EnumValue::Checksum(a))) => Some(a),
            _ => None,
        })
    }

    /// Set the digest algorithm
    pub fn set_algorithm(&self, algorithm: ChecksumAlgorithm) -> Result<()> {
        self.0
            .set_property(prop::ALGORITHM, ModelValue::Enum(algorithm.into()))
    }

    /// The hex digest value
    pub fn checksum_value(&self) -> Result<Option<String>> {
        Ok(self
            .0
            .get_property(prop::CHECKSUM_VALUE)?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Set the hex digest value
    pub fn set_checksum_value(&self, value: &str) -> Result<()> {
        self.0.set_property(prop::CHECKSUM_VALUE, ModelValue::from(value))
    }

    /// Diagnostics for this checksum; see [`ModelObject::verify`]
    pub fn verify(&self) -> Vec<String> {
        self.0.verify()
    }

    /// The untyped model object
    pub fn as_model(&self) -> &ModelObject {
        &self.0
    }
}

impl From<Checksum> for ModelObject {
    fn from(c: Checksum) -> Self {
        c.0
    }
}
