use std::fmt;

use oas_syntax::Node;
use text_size::TextRange;

/// The two supported `major.minor` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    V30,
    V31,
}

/// Why a document was not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrecognized {
    /// The root is not a mapping, or has no `openapi` key.
    Missing,
    /// `openapi` is present but not a string.
    NotAString { range: TextRange },
    /// `openapi` names a version outside the supported lines.
    Unsupported { text: String, range: TextRange },
}

impl Version {
    /// Reads the `openapi` field of the document root.
    pub fn detect(root: &Node) -> Result<Self, Unrecognized> {
        let entry = root.get("openapi").ok_or(Unrecognized::Missing)?;
        let range = entry.value.range();
        let text = entry.value.as_str().ok_or(Unrecognized::NotAString { range })?;

        let release = text.split('-').next().unwrap_or_default();
        let mut parts = release.split('.');
        let version = match (parts.next(), parts.next()) {
            (Some("3"), Some("0")) => Self::V30,
            (Some("3"), Some("1")) => Self::V31,
            _ => return Err(Unrecognized::Unsupported { text: text.to_owned(), range }),
        };
        tracing::debug!(openapi = text, ?version, "detected document version");
        Ok(version)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V30 => "3.0",
            Self::V31 => "3.1",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Unrecognized {
    /// Range of the offending `openapi` value, if there is one.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Missing => None,
            Self::NotAString { range } | Self::Unsupported { range, .. } => Some(*range),
        }
    }
}

impl fmt::Display for Unrecognized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("document has no `openapi` version field"),
            Self::NotAString { .. } => f.write_str("`openapi` version field must be a string"),
            Self::Unsupported { text, .. } => {
                write!(f, "unsupported OpenAPI version `{text}`, expected 3.0.x or 3.1.x")
            }
        }
    }
}
