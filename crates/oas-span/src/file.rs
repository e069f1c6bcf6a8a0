use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use line_index::LineIndex;

/// An input document: its path, its text, and a lazily built line index.
#[derive(Debug)]
pub struct File {
    path: Utf8PathBuf,
    text: String,
    line_index: OnceLock<LineIndex>,
}

impl File {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into(), line_index: OnceLock::new() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        self.line_index.get_or_init(|| LineIndex::new(&self.text))
    }
}
