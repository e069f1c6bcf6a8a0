//! The typed, source-tracking model of an OpenAPI 3.0 or 3.1 document.
//!
//! [`build`] turns the generic tree produced by `oas-syntax` into a
//! [`Document`]. Every named field keeps the span of its key and of its
//! value; keys that are not named fields land in the extension, patterned or
//! unknown map of their object instead of being dropped. [`NodeRef`] is the
//! borrowed view the traversal engine walks.

mod build;
mod error;
mod kind;
mod loose;
mod node_ref;
mod objects;
mod sources;
mod version;

pub use build::{BuildContext, Element, build};
pub use error::ModelError;
pub use kind::{KindSet, NodeKind, NodeRef, UnknownKind, field_names, reachable};
pub use loose::{List, Loose, Map, RefOr};
pub use node_ref::{Child, Collection, Segment, ValueRef};
pub use objects::*;
pub use sources::{FieldSource, KeySource, ValueSource};
pub use version::{Unrecognized, Version};

#[cfg(test)]
mod tests;
