//! The generic document tree consumed by the model builder, and a JSON
//! parser that produces it.
//!
//! Any parser can feed the builder as long as it produces [`Node`]s: ordered
//! mapping entries whose keys carry their own spans, ordered sequence items,
//! decoded scalars, and an enclosing span for every node.

mod ast;
mod cursor;
mod parser;
mod syntax_kind;
mod tokenizer;

pub use ast::{Content, Entry, Key, Node, Scalar};
pub use parser::{MAX_DEPTH, ParseError, parse};
pub use syntax_kind::SyntaxKind;
pub use tokenizer::{Token, Tokenizer};
