//! Core types and traits for spdxdb
//!
//! This crate defines the foundational pieces used throughout the system:
//! - DocumentUri: the namespace scope every identifier lives in
//! - IdType: classification of identifiers by allocation scheme
//! - TypeTag: discriminates concrete model object types
//! - StoredValue: the closed union of what a property slot may hold
//! - ModelStore: the abstract store contract backends implement
//! - SpdxError: error type hierarchy
//! - vocab: symbolic name ⇄ vocabulary URI resolution

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;
pub mod value;
pub mod vocab;

pub use error::{Result, SpdxError};
pub use traits::ModelStore;
pub use types::{DocumentUri, IdType, TypeTag};
pub use value::{SimpleUriValue, StoredValue, TypedValue};
