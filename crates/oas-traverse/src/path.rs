use std::fmt::{self, Write as _};
use std::str::FromStr;

use oas_model::{NodeRef, Segment};

/// The location of the node being visited: the segments from the root and
/// the nodes along the way, root first.
#[derive(Debug, Clone)]
pub struct NodePath<'a, T> {
    segments: Vec<Segment<'a>>,
    nodes: Vec<T>,
}

/// Path through the typed model.
pub type Path<'a> = NodePath<'a, NodeRef<'a>>;

impl<'a, T: Copy> NodePath<'a, T> {
    pub(crate) fn new(root: T) -> Self {
        Self { segments: Vec::new(), nodes: vec![root] }
    }

    pub(crate) fn empty() -> Self {
        Self { segments: Vec::new(), nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, segment: Segment<'a>, node: T) {
        self.segments.push(segment);
        self.nodes.push(node);
    }

    pub(crate) fn pop(&mut self) {
        self.nodes.pop();
        self.segments.truncate(self.nodes.len().saturating_sub(1));
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Number of segments; the root is at depth zero.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn last_segment(&self) -> Option<Segment<'a>> {
        self.segments.last().copied()
    }

    /// The node this path leads to.
    pub fn node(&self) -> Option<T> {
        self.nodes.last().copied()
    }

    /// Nodes above the current one, root first.
    pub fn ancestors(&self) -> &[T] {
        let len = self.nodes.len().saturating_sub(1);
        &self.nodes[..len]
    }

    pub fn parent(&self) -> Option<T> {
        self.ancestors().last().copied()
    }

    pub fn pointer(&self) -> String {
        format_pointer(&self.segments)
    }

    pub fn json_path(&self) -> String {
        format_json_path(&self.segments)
    }

    pub fn dotted(&self) -> String {
        format_dotted(&self.segments)
    }

    pub fn format(&self, format: PathFormat) -> String {
        format.render(&self.segments)
    }
}

/// Renders segments as a JSON Pointer. The root is the empty string.
pub fn format_pointer(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match *segment {
            Segment::Index(index) => {
                let _ = write!(out, "{index}");
            }
            Segment::Field(name) => escape_pointer(&mut out, name),
            Segment::Key(name) => escape_pointer(&mut out, name),
        }
    }
    out
}

fn escape_pointer(out: &mut String, name: &str) {
    for c in name.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            c => out.push(c),
        }
    }
}

/// Renders segments dot-separated: `$`, then `.name` per name and `[index]`
/// per index. A `.`, `[` or `\` inside a name is escaped with a backslash.
pub fn format_dotted(segments: &[Segment<'_>]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        match *segment {
            Segment::Index(index) => {
                let _ = write!(out, "[{index}]");
            }
            Segment::Field(name) => escape_dotted(&mut out, name),
            Segment::Key(name) => escape_dotted(&mut out, name),
        }
    }
    out
}

fn escape_dotted(out: &mut String, name: &str) {
    out.push('.');
    for c in name.chars() {
        if matches!(c, '.' | '[' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Renders segments as a normalized JSONPath: `$`, then `['name']` or
/// `[index]` per segment.
pub fn format_json_path(segments: &[Segment<'_>]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        match *segment {
            Segment::Index(index) => {
                let _ = write!(out, "[{index}]");
            }
            Segment::Field(name) => escape_json_path(&mut out, name),
            Segment::Key(name) => escape_json_path(&mut out, name),
        }
    }
    out
}

fn escape_json_path(out: &mut String, name: &str) {
    out.push_str("['");
    for c in name.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push_str("']");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    #[default]
    Pointer,
    Dotted,
    JsonPath,
}

impl PathFormat {
    pub fn render(self, segments: &[Segment<'_>]) -> String {
        match self {
            Self::Pointer => format_pointer(segments),
            Self::Dotted => format_dotted(segments),
            Self::JsonPath => format_json_path(segments),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path format `{0}`, expected `pointer`, `dotted` or `json-path`")]
pub struct UnknownFormat(String);

impl FromStr for PathFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Self::Pointer),
            "dotted" => Ok(Self::Dotted),
            "json-path" | "jsonpath" => Ok(Self::JsonPath),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pointer => "pointer",
            Self::Dotted => "dotted",
            Self::JsonPath => "json-path",
        })
    }
}
