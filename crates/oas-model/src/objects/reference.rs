use oas_syntax::Node;

use super::object;
use crate::Version;

object! {
    /// A `$ref` to another part of this or another document. The target is
    /// kept as written and never resolved here.
    pub struct Reference {
        target: String = "$ref",
        summary: String = "summary" only V31,
        description: String = "description" only V31,
    }
}

impl Reference {
    /// Whether `node` is a mapping made only of `$ref` and the sibling keys
    /// the version allows next to it.
    pub fn is_reference(version: Version, node: &Node) -> bool {
        let Some(entries) = node.as_mapping() else {
            return false;
        };
        let siblings: &[&str] = match version {
            Version::V30 => &[],
            Version::V31 => &["summary", "description"],
        };
        entries.iter().any(|entry| entry.key.text() == "$ref")
            && entries.iter().all(|entry| {
                let key = entry.key.text();
                key == "$ref" || siblings.contains(&key)
            })
    }

    /// The `$ref` text, when it is a string.
    pub fn target(&self) -> Option<&str> {
        self.target.as_ref()?.value.typed().map(String::as_str)
    }
}
