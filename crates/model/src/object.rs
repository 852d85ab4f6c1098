//! Untyped model object core
//!
//! [`ModelObject`] is the projection of one stored object into the model
//! layer: an (id, type) pair bound to a [`ModelContext`]. It carries no
//! property data of its own; every accessor reads or writes the store
//! directly, so two objects bound to the same (store, document, id) always
//! observe each other's mutations.
//!
//! The concrete wrapper types (annotations, checksums, licenses, ...) are
//! thin newtypes over this core.

use std::collections::HashSet;

use spdx_core::error::{Result, SpdxError};
use spdx_core::traits::ModelStore;
use spdx_core::types::{DocumentUri, IdType, TypeTag};
use spdx_core::value::StoredValue;

use crate::context::ModelContext;
use crate::convert::{self, ModelValue};
use crate::enums::EnumValue;
use crate::schema::{self, prop, Cardinality, PropertySchema};

/// Identity of one object: store allocation, document, local id
type ObjectKey = (usize, DocumentUri, String);

/// A stored object projected into the model layer
///
/// Equality is identity equality: same store allocation, same document,
/// same id. Use [`ModelObject::equivalent`] for structural comparison.
#[derive(Clone)]
pub struct ModelObject {
    ctx: ModelContext,
    id: String,
    type_tag: TypeTag,
}

impl std::fmt::Debug for ModelObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelObject")
            .field("id", &self.id)
            .field("type_tag", &self.type_tag)
            .field("document", self.ctx.document_uri())
            .finish()
    }
}

impl PartialEq for ModelObject {
    fn eq(&self, other: &Self) -> bool {
        self.ctx.store_id() == other.ctx.store_id()
            && self.ctx.document_uri() == other.ctx.document_uri()
            && self.id == other.id
            && self.type_tag == other.type_tag
    }
}

/// Identifier scheme used when an id must be allocated for a new object
///
/// Listed licenses are never allocated (their ids come from the fixed
/// registry) and documents carry one well-known id.
fn allocated_id_type(tag: TypeTag) -> Option<IdType> {
    match tag {
        TypeTag::Annotation | TypeTag::Checksum | TypeTag::Relationship | TypeTag::CrossRef => {
            Some(IdType::Anonymous)
        }
        TypeTag::GenericElement => Some(IdType::SpdxId),
        TypeTag::ExtractedLicense => Some(IdType::LicenseRef),
        TypeTag::ExternalDocumentRef => Some(IdType::DocumentRef),
        TypeTag::ListedLicense | TypeTag::SpdxDocument => None,
    }
}

impl ModelObject {
    /// Create a new object with a freshly allocated identifier
    ///
    /// Documents always live at [`crate::document::DOCUMENT_ID`]; listed
    /// licenses must be created through [`ModelObject::with_id`] with their
    /// registry id.
    pub fn new(ctx: &ModelContext, type_tag: TypeTag) -> Result<ModelObject> {
        match allocated_id_type(type_tag) {
            Some(id_type) => {
                let id = ctx.store().next_id(id_type, ctx.document_uri())?;
                Self::with_id(ctx, &id, type_tag, true)
            }
            None if type_tag == TypeTag::SpdxDocument => {
                Self::with_id(ctx, crate::document::DOCUMENT_ID, type_tag, true)
            }
            None => Err(SpdxError::InvalidId(format!(
                "{type_tag} requires an explicit identifier"
            ))),
        }
    }

    /// Bind to the object at `id`, optionally creating it
    ///
    /// With `create`, a missing object is created and an existing one is
    /// bound; either way the stored type must match `type_tag`. Without
    /// `create`, a missing object is an error.
    pub fn with_id(
        ctx: &ModelContext,
        id: &str,
        type_tag: TypeTag,
        create: bool,
    ) -> Result<ModelObject> {
        let exists = ctx.store().exists(ctx.document_uri(), id)?;
        if exists {
            let found = ctx.store().type_of(ctx.document_uri(), id)?;
            if found != type_tag {
                return Err(SpdxError::TypeMismatch {
                    id: id.to_string(),
                    expected: type_tag,
                    found,
                });
            }
        } else if create {
            ctx.store().create(ctx.document_uri(), id, type_tag)?;
        } else {
            return Err(SpdxError::SourceMissing {
                document: ctx.document_uri().to_string(),
                id: id.to_string(),
            });
        }
        Ok(ModelObject {
            ctx: ctx.clone(),
            id: id.to_string(),
            type_tag,
        })
    }

    /// This object's identifier, local to its document
    pub fn id(&self) -> &str {
        &self.id
    }

    /// This object's concrete type
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The context this object is bound to
    pub fn context(&self) -> &ModelContext {
        &self.ctx
    }

    fn store(&self) -> &dyn ModelStore {
        self.ctx.store().as_ref()
    }

    fn document(&self) -> &DocumentUri {
        self.ctx.document_uri()
    }

    fn key(&self) -> ObjectKey {
        (
            self.ctx.store_id(),
            self.document().clone(),
            self.id.clone(),
        )
    }

    /// Declared schema of a single-valued property, or an error naming it
    fn single_schema(&self, name: &str) -> Result<&'static PropertySchema> {
        match schema::property_schema(self.type_tag, name) {
            Some(p) if p.cardinality == Cardinality::Single => Ok(p),
            Some(_) => Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("{} is a collection on {}", name, self.type_tag),
            }),
            None => Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("{} does not declare {}", self.type_tag, name),
            }),
        }
    }

    /// Read a single-valued property
    pub fn get_property(&self, name: &str) -> Result<Option<ModelValue>> {
        self.single_schema(name)?;
        let stored = self.store().get_value(self.document(), &self.id, name)?;
        convert::opt_stored_to_model(stored, &self.ctx)
    }

    /// Write a single-valued property, replacing any previous value
    ///
    /// The value must satisfy the property's declared kind, and object
    /// values must live in a compatible context.
    pub fn set_property(&self, name: &str, value: ModelValue) -> Result<()> {
        let schema = self.single_schema(name)?;
        if !convert::kind_matches(schema.kind, &value) {
            return Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("expected {:?}, got {value:?}", schema.kind),
            });
        }
        let stored = convert::model_to_stored(&value, &self.ctx)?;
        self.store()
            .set_value(self.document(), &self.id, name, stored)
    }

    /// Remove a property entirely; absent properties are a no-op
    pub fn clear_property(&self, name: &str) -> Result<()> {
        if schema::property_schema(self.type_tag, name).is_none() {
            return Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("{} does not declare {}", self.type_tag, name),
            });
        }
        self.store().remove_value(self.document(), &self.id, name)
    }

    /// Open a collection-valued property
    pub fn collection(&self, name: &str) -> Result<ModelCollection> {
        match schema::property_schema(self.type_tag, name) {
            Some(p) if p.cardinality != Cardinality::Single => Ok(ModelCollection {
                object: self.clone(),
                schema: p,
            }),
            Some(_) => Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("{} is single-valued on {}", name, self.type_tag),
            }),
            None => Err(SpdxError::InvalidValue {
                property: name.to_string(),
                message: format!("{} does not declare {}", self.type_tag, name),
            }),
        }
    }

    // ------------------------------------------------------------------
    // verify
    // ------------------------------------------------------------------

    /// Check this object and everything reachable from it
    ///
    /// Returns human-readable diagnostics, one per violation; an empty
    /// vector means the subgraph is well-formed. Never fails: store and
    /// conversion errors become diagnostics. Cyclic graphs are handled by
    /// visiting each object at most once.
    pub fn verify(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut visited = HashSet::new();
        self.verify_into(&mut issues, &mut visited);
        issues
    }

    fn verify_into(&self, issues: &mut Vec<String>, visited: &mut HashSet<ObjectKey>) {
        if !visited.insert(self.key()) {
            return;
        }
        for p in schema::schema_of(self.type_tag) {
            match p.cardinality {
                Cardinality::Single => self.verify_single(p, issues, visited),
                _ => self.verify_collection(p, issues, visited),
            }
        }
        if self.type_tag == TypeTag::Checksum {
            self.verify_digest_length(issues);
        }
    }

    fn verify_single(
        &self,
        p: &PropertySchema,
        issues: &mut Vec<String>,
        visited: &mut HashSet<ObjectKey>,
    ) {
        let stored = match self.store().get_value(self.document(), &self.id, p.name) {
            Ok(v) => v,
            Err(e) => {
                issues.push(format!("{}: reading {}: {e}", self.id, p.name));
                return;
            }
        };
        match stored {
            None => {
                if p.required {
                    issues.push(format!("{}: missing required {}", self.id, p.name));
                }
            }
            Some(stored) => self.verify_value(p, stored, issues, visited),
        }
    }

    fn verify_collection(
        &self,
        p: &PropertySchema,
        issues: &mut Vec<String>,
        visited: &mut HashSet<ObjectKey>,
    ) {
        let values = match self
            .store()
            .collection_values(self.document(), &self.id, p.name)
        {
            Ok(v) => v,
            Err(e) => {
                issues.push(format!("{}: reading {}: {e}", self.id, p.name));
                return;
            }
        };
        for stored in values {
            self.verify_value(p, stored, issues, visited);
        }
    }

    fn verify_value(
        &self,
        p: &PropertySchema,
        stored: StoredValue,
        issues: &mut Vec<String>,
        visited: &mut HashSet<ObjectKey>,
    ) {
        let value = match convert::stored_to_model(stored, &self.ctx) {
            Ok(v) => v,
            Err(e) => {
                issues.push(format!("{}: {}: {e}", self.id, p.name));
                return;
            }
        };
        if !convert::kind_matches(p.kind, &value) {
            issues.push(format!(
                "{}: {} has wrong kind (expected {:?})",
                self.id, p.name, p.kind
            ));
            return;
        }
        if let ModelValue::Object(obj) = value {
            obj.verify_into(issues, visited);
        }
    }

    /// Digest values must be lowercase-insensitive hex of the algorithm's
    /// exact length
    fn verify_digest_length(&self, issues: &mut Vec<String>) {
        let algorithm = self
            .store()
            .get_value(self.document(), &self.id, prop::ALGORITHM)
            .ok()
            .flatten()
            .and_then(|v| v.as_uri().and_then(EnumValue::from_uri))
            .and_then(|e| match e {
                EnumValue::Checksum(a) => Some(a),
                _ => None,
            });
        let value = self
            .store()
            .get_value(self.document(), &self.id, prop::CHECKSUM_VALUE)
            .ok()
            .flatten()
            .and_then(|v| v.as_str().map(str::to_string));
        if let (Some(algorithm), Some(value)) = (algorithm, value) {
            let hex = value.chars().all(|c| c.is_ascii_hexdigit());
            if !hex || value.len() != algorithm.hex_len() {
                issues.push(format!(
                    "{}: checksumValue is not {} hex characters for {algorithm:?}",
                    self.id,
                    algorithm.hex_len()
                ));
            }
        }
    }

    // ------------------------------------------------------------------
    // equivalent
    // ------------------------------------------------------------------

    /// Structural equivalence, ignoring identifiers and store identity
    ///
    /// Two objects are equivalent when they have the same type and every
    /// declared property matches: scalars and individuals by value,
    /// external references by URI, sub-objects recursively, unordered
    /// collections as multisets. Absent matches absent.
    pub fn equivalent(&self, other: &ModelObject) -> Result<bool> {
        let mut in_progress = HashSet::new();
        self.equivalent_inner(other, &mut in_progress)
    }

    fn equivalent_inner(
        &self,
        other: &ModelObject,
        in_progress: &mut HashSet<(ObjectKey, ObjectKey)>,
    ) -> Result<bool> {
        if self.type_tag != other.type_tag {
            return Ok(false);
        }
        // A pair already under comparison differs only if something else
        // on the cycle differs.
        if !in_progress.insert((self.key(), other.key())) {
            return Ok(true);
        }
        for p in schema::schema_of(self.type_tag) {
            let same = match p.cardinality {
                Cardinality::Single => {
                    let a = convert::opt_stored_to_model(
                        self.store().get_value(self.document(), &self.id, p.name)?,
                        &self.ctx,
                    )?;
                    let b = convert::opt_stored_to_model(
                        other
                            .store()
                            .get_value(other.document(), &other.id, p.name)?,
                        &other.ctx,
                    )?;
                    match (a, b) {
                        (None, None) => true,
                        (Some(a), Some(b)) => values_equivalent(&a, &b, in_progress)?,
                        _ => false,
                    }
                }
                cardinality => {
                    let a = self
                        .store()
                        .collection_values(self.document(), &self.id, p.name)?
                        .into_iter()
                        .map(|v| convert::stored_to_model(v, &self.ctx))
                        .collect::<Result<Vec<_>>>()?;
                    let b = other
                        .store()
                        .collection_values(other.document(), &other.id, p.name)?
                        .into_iter()
                        .map(|v| convert::stored_to_model(v, &other.ctx))
                        .collect::<Result<Vec<_>>>()?;
                    match cardinality {
                        Cardinality::Ordered => sequences_equivalent(&a, &b, in_progress)?,
                        _ => multisets_equivalent(a, b, in_progress)?,
                    }
                }
            };
            if !same {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // copy_from
    // ------------------------------------------------------------------

    /// Replace all of this object's properties with `source`'s
    ///
    /// Within a compatible context, stored values are copied verbatim and
    /// references alias the same sub-objects. Across contexts, the copy
    /// manager duplicates the reachable subgraph into this object's
    /// (store, document), sharing each source object at most once.
    pub fn copy_from(&self, source: &ModelObject) -> Result<()> {
        if source.type_tag != self.type_tag {
            return Err(SpdxError::TypeMismatch {
                id: source.id.clone(),
                expected: self.type_tag,
                found: source.type_tag,
            });
        }
        if source.ctx.compatible_with(&self.ctx) {
            for p in schema::schema_of(self.type_tag) {
                self.store().remove_value(self.document(), &self.id, p.name)?;
                match p.cardinality {
                    Cardinality::Single => {
                        if let Some(v) =
                            source.store().get_value(source.document(), &source.id, p.name)?
                        {
                            self.store().set_value(self.document(), &self.id, p.name, v)?;
                        }
                    }
                    _ => {
                        for v in source.store().collection_values(
                            source.document(),
                            &source.id,
                            p.name,
                        )? {
                            self.store()
                                .collection_add(self.document(), &self.id, p.name, v)?;
                        }
                    }
                }
            }
            return Ok(());
        }
        self.ctx.copy_manager().copy(
            self.ctx.store(),
            self.document(),
            &self.id,
            source.ctx.store(),
            source.document(),
            &source.id,
            self.type_tag,
        )
    }
}

fn values_equivalent(
    a: &ModelValue,
    b: &ModelValue,
    in_progress: &mut HashSet<(ObjectKey, ObjectKey)>,
) -> Result<bool> {
    match (a, b) {
        (ModelValue::Object(a), ModelValue::Object(b)) => a.equivalent_inner(b, in_progress),
        (ModelValue::Object(_), _) | (_, ModelValue::Object(_)) => Ok(false),
        _ => Ok(a == b),
    }
}

/// Positional matching for ordered collections
fn sequences_equivalent(
    a: &[ModelValue],
    b: &[ModelValue],
    in_progress: &mut HashSet<(ObjectKey, ObjectKey)>,
) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !values_equivalent(x, y, in_progress)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Greedy multiset matching; adequate because value equivalence is an
/// equivalence relation over the value shapes that occur here
fn multisets_equivalent(
    a: Vec<ModelValue>,
    b: Vec<ModelValue>,
    in_progress: &mut HashSet<(ObjectKey, ObjectKey)>,
) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    let mut unmatched: Vec<ModelValue> = b;
    'outer: for value in &a {
        for i in 0..unmatched.len() {
            if values_equivalent(value, &unmatched[i], in_progress)? {
                unmatched.swap_remove(i);
                continue 'outer;
            }
        }
        return Ok(false);
    }
    Ok(true)
}

/// Live view of one collection-valued property
///
/// Mutations go straight to the store; `values()` re-reads on every call.
#[derive(Debug, Clone)]
pub struct ModelCollection {
    object: ModelObject,
    schema: &'static PropertySchema,
}

impl ModelCollection {
    /// The property this collection lives under
    pub fn property(&self) -> &'static str {
        self.schema.name
    }

    /// All values, in insertion order
    pub fn values(&self) -> Result<Vec<ModelValue>> {
        self.object
            .store()
            .collection_values(self.object.document(), &self.object.id, self.schema.name)?
            .into_iter()
            .map(|v| convert::stored_to_model(v, &self.object.ctx))
            .collect()
    }

    /// Append a value
    pub fn add(&self, value: ModelValue) -> Result<()> {
        if !convert::kind_matches(self.schema.kind, &value) {
            return Err(SpdxError::InvalidValue {
                property: self.schema.name.to_string(),
                message: format!("expected {:?}, got {value:?}", self.schema.kind),
            });
        }
        let stored = convert::model_to_stored(&value, &self.object.ctx)?;
        self.object.store().collection_add(
            self.object.document(),
            &self.object.id,
            self.schema.name,
            stored,
        )
    }

    /// Remove the first occurrence of a value; reports whether one was
    /// removed
    pub fn remove(&self, value: &ModelValue) -> Result<bool> {
        let stored = convert::model_to_stored(value, &self.object.ctx)?;
        self.object.store().collection_remove(
            self.object.document(),
            &self.object.id,
            self.schema.name,
            &stored,
        )
    }

    /// Whether the collection contains a value
    pub fn contains(&self, value: &ModelValue) -> Result<bool> {
        let stored = convert::model_to_stored(value, &self.object.ctx)?;
        self.object.store().collection_contains(
            self.object.document(),
            &self.object.id,
            self.schema.name,
            &stored,
        )
    }

    /// Number of values
    pub fn len(&self) -> Result<usize> {
        self.object.store().collection_size(
            self.object.document(),
            &self.object.id,
            self.schema.name,
        )
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop every value
    pub fn clear(&self) -> Result<()> {
        self.object.store().remove_value(
            self.object.document(),
            &self.object.id,
            self.schema.name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyManager;
    use crate::enums::AnnotationType;
    use spdx_storage::InMemStore;
    use std::sync::Arc;

    fn ctx() -> ModelContext {
        ModelContext::new(
            Arc::new(InMemStore::new()),
            DocumentUri::new("http://test.document.uri/1"),
            CopyManager::new(),
        )
    }

    fn annotation(ctx: &ModelContext) -> ModelObject {
        let obj = ModelObject::new(ctx, TypeTag::Annotation).unwrap();
        obj.set_property(prop::ANNOTATOR, ModelValue::from("Person: Jane"))
            .unwrap();
        obj.set_property(
            prop::ANNOTATION_TYPE,
            ModelValue::Enum(AnnotationType::Review.into()),
        )
        .unwrap();
        obj.set_property(prop::ANNOTATION_DATE, ModelValue::from("2011-01-29T18:30:22Z"))
            .unwrap();
        obj.set_property(prop::COMMENT, ModelValue::from("looks fine"))
            .unwrap();
        obj
    }

    #[test]
    fn new_allocates_scheme_prefixed_ids() {
        let ctx = ctx();
        let element = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        assert!(element.id().starts_with("SPDXRef-"));
        let license = ModelObject::new(&ctx, TypeTag::ExtractedLicense).unwrap();
        assert!(license.id().starts_with("LicenseRef-"));
        let anon = ModelObject::new(&ctx, TypeTag::Checksum).unwrap();
        assert_eq!(IdType::of(anon.id()), IdType::Anonymous);
    }

    #[test]
    fn new_listed_license_requires_explicit_id() {
        let ctx = ctx();
        assert!(matches!(
            ModelObject::new(&ctx, TypeTag::ListedLicense),
            Err(SpdxError::InvalidId(_))
        ));
    }

    #[test]
    fn with_id_create_then_bind() {
        let ctx = ctx();
        let a = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        let b = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn with_id_rejects_type_confusion() {
        let ctx = ctx();
        ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        let err = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::Annotation, true).unwrap_err();
        match err {
            SpdxError::TypeMismatch {
                id,
                expected,
                found,
            } => {
                assert_eq!(id, "SPDXRef-1");
                assert_eq!(expected, TypeTag::Annotation);
                assert_eq!(found, TypeTag::GenericElement);
            }
            other => panic!("expected a type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn bind_missing_fails() {
        let ctx = ctx();
        let err =
            ModelObject::with_id(&ctx, "SPDXRef-none", TypeTag::GenericElement, false).unwrap_err();
        assert!(matches!(err, SpdxError::SourceMissing { .. }));
    }

    #[test]
    fn property_round_trip_through_the_store() {
        let ctx = ctx();
        let obj = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        assert_eq!(obj.get_property(prop::NAME).unwrap(), None);
        obj.set_property(prop::NAME, ModelValue::from("thing")).unwrap();
        assert_eq!(
            obj.get_property(prop::NAME).unwrap(),
            Some(ModelValue::from("thing"))
        );
        // A second binding observes the same store state.
        let again = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, false).unwrap();
        assert_eq!(
            again.get_property(prop::NAME).unwrap(),
            Some(ModelValue::from("thing"))
        );
        obj.clear_property(prop::NAME).unwrap();
        assert_eq!(obj.get_property(prop::NAME).unwrap(), None);
    }

    #[test]
    fn undeclared_property_is_rejected() {
        let ctx = ctx();
        let obj = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        assert!(matches!(
            obj.get_property("licenseId"),
            Err(SpdxError::InvalidValue { .. })
        ));
        assert!(matches!(
            obj.set_property("licenseId", ModelValue::from("x")),
            Err(SpdxError::InvalidValue { .. })
        ));
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let ctx = ctx();
        let obj = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        let err = obj
            .set_property(prop::NAME, ModelValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, SpdxError::InvalidValue { .. }));
    }

    #[test]
    fn collection_crud() {
        let ctx = ctx();
        let license =
            ModelObject::with_id(&ctx, "LicenseRef-1", TypeTag::ExtractedLicense, true).unwrap();
        let see_also = license.collection(prop::SEE_ALSO).unwrap();
        assert!(see_also.is_empty().unwrap());
        see_also.add(ModelValue::from("http://a")).unwrap();
        see_also.add(ModelValue::from("http://b")).unwrap();
        assert_eq!(see_also.len().unwrap(), 2);
        assert!(see_also.contains(&ModelValue::from("http://a")).unwrap());
        assert!(see_also.remove(&ModelValue::from("http://a")).unwrap());
        assert!(!see_also.remove(&ModelValue::from("http://a")).unwrap());
        assert_eq!(
            see_also.values().unwrap(),
            vec![ModelValue::from("http://b")]
        );
        see_also.clear().unwrap();
        assert!(see_also.is_empty().unwrap());
    }

    #[test]
    fn collection_on_single_property_is_rejected() {
        let ctx = ctx();
        let obj = ModelObject::with_id(&ctx, "SPDXRef-1", TypeTag::GenericElement, true).unwrap();
        assert!(matches!(
            obj.collection(prop::NAME),
            Err(SpdxError::InvalidValue { .. })
        ));
    }

    #[test]
    fn verify_reports_each_missing_required_property() {
        let ctx = ctx();
        let obj = ModelObject::new(&ctx, TypeTag::Annotation).unwrap();
        let issues = obj.verify();
        assert_eq!(issues.len(), 4, "{issues:?}");
        let complete = annotation(&ctx);
        assert!(complete.verify().is_empty());
    }

    #[test]
    fn verify_recurses_into_owned_objects() {
        let ctx = ctx();
        let element = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        // Incomplete annotation reachable through a collection.
        let bad = ModelObject::new(&ctx, TypeTag::Annotation).unwrap();
        element
            .collection(prop::ANNOTATION)
            .unwrap()
            .add(ModelValue::Object(bad))
            .unwrap();
        assert_eq!(element.verify().len(), 4);
    }

    #[test]
    fn verify_terminates_on_cycles() {
        let ctx = ctx();
        let a = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        let b = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        let rel_ab = ModelObject::new(&ctx, TypeTag::Relationship).unwrap();
        rel_ab
            .set_property(prop::RELATED_ELEMENT, ModelValue::Object(b.clone()))
            .unwrap();
        let rel_ba = ModelObject::new(&ctx, TypeTag::Relationship).unwrap();
        rel_ba
            .set_property(prop::RELATED_ELEMENT, ModelValue::Object(a.clone()))
            .unwrap();
        a.collection(prop::RELATIONSHIP)
            .unwrap()
            .add(ModelValue::Object(rel_ab))
            .unwrap();
        b.collection(prop::RELATIONSHIP)
            .unwrap()
            .add(ModelValue::Object(rel_ba))
            .unwrap();
        // Each relationship is missing its relationshipType, once each.
        let issues = a.verify();
        assert_eq!(issues.len(), 2, "{issues:?}");
    }

    #[test]
    fn equivalent_ignores_identity() {
        let ctx = ctx();
        let a = annotation(&ctx);
        let b = annotation(&ctx);
        assert_ne!(a, b);
        assert!(a.equivalent(&b).unwrap());
        b.set_property(prop::COMMENT, ModelValue::from("changed"))
            .unwrap();
        assert!(!a.equivalent(&b).unwrap());
    }

    #[test]
    fn equivalent_absent_matches_absent_only() {
        let ctx = ctx();
        let a = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        let b = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        assert!(a.equivalent(&b).unwrap());
        a.set_property(prop::NAME, ModelValue::from("x")).unwrap();
        assert!(!a.equivalent(&b).unwrap());
    }

    #[test]
    fn equivalent_unordered_collections_match_as_multisets() {
        let ctx = ctx();
        let a = ModelObject::with_id(&ctx, "LicenseRef-a", TypeTag::ExtractedLicense, true).unwrap();
        let b = ModelObject::with_id(&ctx, "LicenseRef-b", TypeTag::ExtractedLicense, true).unwrap();
        for obj in [&a, &b] {
            obj.set_property(prop::EXTRACTED_TEXT, ModelValue::from("text"))
                .unwrap();
        }
        let sa = a.collection(prop::SEE_ALSO).unwrap();
        let sb = b.collection(prop::SEE_ALSO).unwrap();
        sa.add(ModelValue::from("http://a")).unwrap();
        sa.add(ModelValue::from("http://b")).unwrap();
        sb.add(ModelValue::from("http://b")).unwrap();
        sb.add(ModelValue::from("http://a")).unwrap();
        assert!(a.equivalent(&b).unwrap());
        sb.add(ModelValue::from("http://c")).unwrap();
        assert!(!a.equivalent(&b).unwrap());
    }

    #[test]
    fn ordered_comparison_is_positional() {
        let mut in_progress = HashSet::new();
        let a = vec![ModelValue::from("x"), ModelValue::from("y")];
        let b = vec![ModelValue::from("y"), ModelValue::from("x")];
        assert!(sequences_equivalent(&a, &a.clone(), &mut in_progress).unwrap());
        assert!(!sequences_equivalent(&a, &b, &mut in_progress).unwrap());
        assert!(!sequences_equivalent(&a, &b[..1].to_vec(), &mut in_progress).unwrap());
        // The same pair matches once order stops mattering.
        assert!(multisets_equivalent(a, b, &mut in_progress).unwrap());
    }

    #[test]
    fn equivalent_across_types_is_false() {
        let ctx = ctx();
        let a = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
        let b = ModelObject::new(&ctx, TypeTag::Checksum).unwrap();
        assert!(!a.equivalent(&b).unwrap());
    }

    #[test]
    fn equivalent_terminates_on_cycles() {
        let ctx = ctx();
        let make_cycle = || {
            let e = ModelObject::new(&ctx, TypeTag::GenericElement).unwrap();
            let rel = ModelObject::new(&ctx, TypeTag::Relationship).unwrap();
            rel.set_property(prop::RELATED_ELEMENT, ModelValue::Object(e.clone()))
                .unwrap();
            rel.set_property(
                prop::RELATIONSHIP_TYPE,
                ModelValue::Enum(crate::enums::RelationshipType::Contains.into()),
            )
            .unwrap();
            e.collection(prop::RELATIONSHIP)
                .unwrap()
                .add(ModelValue::Object(rel))
                .unwrap();
            e
        };
        let a = make_cycle();
        let b = make_cycle();
        assert!(a.equivalent(&b).unwrap());
    }

    #[test]
    fn copy_from_same_context_replaces_properties() {
        let ctx = ctx();
        let source = annotation(&ctx);
        let target = ModelObject::new(&ctx, TypeTag::Annotation).unwrap();
        target
            .set_property(prop::COMMENT, ModelValue::from("stale"))
            .unwrap();
        target.copy_from(&source).unwrap();
        assert!(target.equivalent(&source).unwrap());
        assert_eq!(
            target.get_property(prop::COMMENT).unwrap(),
            Some(ModelValue::from("looks fine"))
        );
    }

    #[test]
    fn copy_from_rejects_type_confusion() {
        let ctx = ctx();
        let source = ModelObject::new(&ctx, TypeTag::Checksum).unwrap();
        let target = ModelObject::new(&ctx, TypeTag::Annotation).unwrap();
        assert!(matches!(
            target.copy_from(&source),
            Err(SpdxError::TypeMismatch { .. })
        ));
    }
}
