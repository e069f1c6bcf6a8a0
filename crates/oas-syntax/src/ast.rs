use oas_span::SourceSpan;
use serde_json::{Map, Number, Value};
use text_size::{TextRange, TextSize};

/// A node of the generic document tree: a mapping, a sequence or a scalar,
/// together with the byte range and line/column span it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    range: TextRange,
    span: SourceSpan,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Entries in source order. Duplicate keys are kept.
    Mapping(Vec<Entry>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Key,
    pub value: Node,
}

/// The key token of a mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    text: String,
    range: TextRange,
    span: SourceSpan,
}

impl Key {
    pub fn new(text: impl Into<String>, range: TextRange, span: SourceSpan) -> Self {
        Self { text: text.into(), range, span }
    }

    pub fn synthetic(text: impl Into<String>) -> Self {
        Self::new(text, TextRange::empty(TextSize::new(0)), SourceSpan::ZERO)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl Node {
    pub fn new(content: Content, range: TextRange, span: SourceSpan) -> Self {
        Self { range, span, content }
    }

    /// A node with no source location, for documents built in memory.
    pub fn synthetic(content: Content) -> Self {
        Self::new(content, TextRange::empty(TextSize::new(0)), SourceSpan::ZERO)
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn as_mapping(&self) -> Option<&[Entry]> {
        match &self.content {
            Content::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.content {
            Content::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.content {
            Content::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.content {
            Content::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.content {
            Content::Scalar(Scalar::Bool(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match &self.content {
            Content::Scalar(Scalar::Number(number)) => Some(number),
            _ => None,
        }
    }

    /// First entry with the given key.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.as_mapping()?.iter().find(|entry| entry.key.text() == key)
    }

    /// Short name of the node's shape, used in messages.
    pub fn shape_name(&self) -> &'static str {
        match &self.content {
            Content::Mapping(_) => "mapping",
            Content::Sequence(_) => "sequence",
            Content::Scalar(Scalar::Null) => "null",
            Content::Scalar(Scalar::Bool(_)) => "boolean",
            Content::Scalar(Scalar::Number(_)) => "number",
            Content::Scalar(Scalar::String(_)) => "string",
        }
    }

    pub fn to_json(&self) -> Value {
        match &self.content {
            Content::Mapping(entries) => {
                let mut map = Map::new();
                for entry in entries {
                    if !map.contains_key(entry.key.text()) {
                        map.insert(entry.key.text().to_owned(), entry.value.to_json());
                    }
                }
                Value::Object(map)
            }
            Content::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Content::Scalar(Scalar::Null) => Value::Null,
            Content::Scalar(Scalar::Bool(value)) => Value::Bool(*value),
            Content::Scalar(Scalar::Number(number)) => Value::Number(number.clone()),
            Content::Scalar(Scalar::String(text)) => Value::String(text.clone()),
        }
    }

    /// Builds a synthetic tree (all spans zero) from a JSON value.
    pub fn from_json(value: &Value) -> Self {
        let content = match value {
            Value::Null => Content::Scalar(Scalar::Null),
            Value::Bool(value) => Content::Scalar(Scalar::Bool(*value)),
            Value::Number(number) => Content::Scalar(Scalar::Number(number.clone())),
            Value::String(text) => Content::Scalar(Scalar::String(text.clone())),
            Value::Array(items) => Content::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Content::Mapping(
                map.iter()
                    .map(|(key, value)| Entry { key: Key::synthetic(key), value: Self::from_json(value) })
                    .collect(),
            ),
        };
        Self::synthetic(content)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_conversion_keeps_order_and_first_duplicate() {
        let node = Node::from_json(&json!({"b": 1, "a": [true, null, "x"]}));
        let keys: Vec<_> = node.as_mapping().unwrap().iter().map(|e| e.key.text()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(node.span(), SourceSpan::ZERO);
        assert_eq!(node.to_json(), json!({"b": 1, "a": [true, null, "x"]}));

        let duplicated = Node::synthetic(Content::Mapping(vec![
            Entry { key: Key::synthetic("k"), value: Node::from_json(&json!(1)) },
            Entry { key: Key::synthetic("k"), value: Node::from_json(&json!(2)) },
        ]));
        assert_eq!(duplicated.to_json(), json!({"k": 1}));
        assert_eq!(duplicated.get("k").unwrap().value.as_number(), Some(&Number::from(1)));
    }

    #[test]
    fn shape_names() {
        let shapes: Vec<_> = [json!({}), json!([]), json!(null), json!(false), json!(1.5), json!("s")]
            .iter()
            .map(|value| Node::from_json(value).shape_name())
            .collect();
        assert_eq!(shapes, ["mapping", "sequence", "null", "boolean", "number", "string"]);
    }
}
