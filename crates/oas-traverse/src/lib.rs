//! Depth-first traversal of the typed model and of generic trees.
//!
//! [`traverse`] pushes every node to a [`Visitor`], dispatching on its
//! [`NodeKind`](oas_model::NodeKind); [`walk`] pulls `(path, node)` pairs
//! instead. Both keep children in document order and track the path from
//! the root, which renders as a JSON Pointer, a dotted path, or a normalized
//! JSONPath.

mod engine;
mod merge;
mod path;
mod tree;
mod visitor;
mod walk;

pub use engine::{traverse, traverse_generic};
pub use merge::{Merged, merge};
pub use path::{
    NodePath, Path, PathFormat, UnknownFormat, format_dotted, format_json_path, format_pointer,
};
pub use tree::Tree;
pub use visitor::{GenericVisitor, Visitor, dispatch, dispatch_leave};
pub use walk::{Walk, walk};

/// What a hook asks the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    /// Descend into the node's children, then move on to its siblings.
    #[default]
    Continue,
    /// Leave the node's children out and move on to its siblings.
    SkipChildren,
    /// Stop the whole traversal.
    Break,
}
