//! Storage backends for spdxdb
//!
//! Currently one backend: [`InMemStore`], a map-backed implementation of
//! the `ModelStore` contract with a JSON serialization boundary. Any other
//! backend implementing the same contract is interchangeable under the
//! model layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;

pub use memory::InMemStore;
