//! Loading and checking whole documents.
//!
//! [`check_file`] is the top-level check: it parses a [`File`], decides
//! whether it is an OpenAPI 3.0 or 3.1 document, builds the model and runs
//! the generic checks the [`CheckConfig`] enables. Documents that are not
//! recognized still get a traversal of their raw tree, which reports the
//! fact as a single diagnostic.

mod checks;
mod config;

pub use config::{CheckConfig, UnrecognizedMode};
pub use oas_errors::{Diagnostic, Severity};
use oas_model::{Document, ModelError, Unrecognized, Version, build};
pub use oas_span::File;
use oas_syntax::{Node, ParseError, parse};
use oas_traverse::walk;
use text_size::TextRange;

use crate::checks::{DuplicateKeyCheck, RecognitionCheck, run};

/// A parsed document and, when it is recognized and builds, its model.
#[derive(Debug)]
pub struct Loaded {
    pub ast: Node,
    pub version: Result<Version, Unrecognized>,
    pub document: Option<Document>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl LoadError {
    pub fn into_diagnostic(self, root: Option<&Node>) -> Diagnostic {
        match self {
            Self::Parse(err) => Diagnostic::error("syntax", err.message(), err.range()),
            Self::Model(err) => {
                let range = root.map_or_else(TextRange::default, |root| locate(root, err.path()));
                Diagnostic::error("model", err.to_string(), range)
            }
        }
    }
}

/// Parses `file` and builds its model. An unrecognized document is not an
/// error: it loads with no model.
pub fn load(file: &File) -> Result<Loaded, LoadError> {
    let ast = parse(file.text())?;
    let version = Version::detect(&ast);
    let document = match version {
        Ok(version) => {
            tracing::debug!(path = %file.path(), %version, "building document");
            Some(build(&ast, version)?)
        }
        Err(ref reason) => {
            tracing::debug!(path = %file.path(), %reason, "document not recognized");
            None
        }
    };
    Ok(Loaded { ast, version, document })
}

/// Runs every check `config` enables on `file`.
pub fn check_file(file: &File, config: &CheckConfig) -> Vec<Diagnostic> {
    let _span = tracing::debug_span!("check_file", path = %file.path()).entered();

    let root = match parse(file.text()) {
        Ok(root) => root,
        Err(err) => return vec![LoadError::Parse(err).into_diagnostic(None)],
    };

    let mut diagnostics = Vec::new();
    let generic = match Version::detect(&root) {
        Ok(version) => {
            if let Err(err) = build(&root, version) {
                diagnostics.push(LoadError::Model(err).into_diagnostic(Some(&root)));
            }
            true
        }
        Err(reason) => {
            tracing::debug!(%reason, "document not recognized");
            diagnostics.extend(run(&root, &mut RecognitionCheck::new(&reason)));
            config.unrecognized == UnrecognizedMode::AllGenericChecks
        }
    };

    if generic && config.duplicate_keys {
        diagnostics.extend(run(&root, &mut DuplicateKeyCheck::default()));
    }

    tracing::debug!(count = diagnostics.len(), "checked document");
    diagnostics
}

/// Range of the node at `pointer`, or of the whole document when no node
/// has that path.
fn locate(root: &Node, pointer: &str) -> TextRange {
    walk(root)
        .find(|(path, _)| path.pointer() == pointer)
        .map_or_else(|| root.range(), |(_, node)| node.range())
}

#[cfg(test)]
mod tests {
    use oas_syntax::parse;

    use super::*;

    #[test]
    fn model_errors_point_at_their_node() {
        let text = r#"{"openapi": "3.0.0", "info": {"title": "t"}}"#;
        let root = parse(text).unwrap();
        let err = ModelError::Construction { path: "/info".to_owned(), reason: "test".to_owned() };

        let diagnostic = LoadError::Model(err).into_diagnostic(Some(&root));
        assert_eq!(diagnostic.check(), "model");
        assert_eq!(&text[diagnostic.range()], r#"{"title": "t"}"#);
        assert_eq!(diagnostic.message(), "cannot build model at `/info`: test");
    }

    #[test]
    fn unknown_pointers_fall_back_to_the_root() {
        let root = parse("[1]").unwrap();
        assert_eq!(locate(&root, "/nope"), root.range());
    }

    #[test]
    fn load_keeps_unrecognized_documents() {
        let file = File::new("a.json", r#"{"swagger": "2.0"}"#);
        let loaded = load(&file).unwrap();
        assert_eq!(loaded.version, Err(Unrecognized::Missing));
        assert!(loaded.document.is_none());
        assert!(loaded.ast.get("swagger").is_some());

        let file = File::new("b.json", r#"{"openapi": "3.1.0", "paths": {}}"#);
        let loaded = load(&file).unwrap();
        assert_eq!(loaded.version, Ok(Version::V31));
        assert!(loaded.document.is_some_and(|document| document.paths.is_some()));
    }

    #[test]
    fn load_reports_syntax_errors() {
        let file = File::new("c.json", "{");
        assert!(matches!(load(&file), Err(LoadError::Parse(_))));
    }
}
