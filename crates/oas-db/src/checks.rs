use std::collections::HashSet;
use std::convert::Infallible;

use oas_errors::Diagnostic;
use oas_model::Unrecognized;
use oas_syntax::Node;
use oas_traverse::{Control, GenericVisitor, NodePath, traverse_generic};
use text_size::{TextRange, TextSize};

/// A check that runs over the raw document tree.
pub(crate) trait GenericCheck<'a>: GenericVisitor<'a, &'a Node, Error = Infallible> {
    fn take_diagnostics(&mut self) -> Vec<Diagnostic>;
}

pub(crate) fn run<'a>(root: &'a Node, check: &mut dyn GenericCheck<'a>) -> Vec<Diagnostic> {
    let Ok(()) = traverse_generic(root, &mut *check);
    check.take_diagnostics()
}

/// Reports, once, that the document is not a supported OpenAPI document.
pub(crate) struct RecognitionCheck<'r> {
    reason: &'r Unrecognized,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> RecognitionCheck<'r> {
    pub(crate) fn new(reason: &'r Unrecognized) -> Self {
        Self { reason, diagnostics: Vec::new() }
    }
}

impl<'a> GenericVisitor<'a, &'a Node> for RecognitionCheck<'_> {
    type Error = Infallible;

    fn visit_node(
        &mut self,
        node: &'a Node,
        _: &NodePath<'a, &'a Node>,
    ) -> Result<Control, Infallible> {
        // The first node visited is the root; nothing below it matters.
        let range = self
            .reason
            .range()
            .unwrap_or_else(|| TextRange::at(node.range().start(), TextSize::new(1)));
        self.diagnostics.push(Diagnostic::error("recognition", self.reason.to_string(), range));
        Ok(Control::Break)
    }
}

impl<'a> GenericCheck<'a> for RecognitionCheck<'_> {
    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Flags every repeated key of a mapping after its first occurrence, which
/// is the one the model keeps.
#[derive(Default)]
pub(crate) struct DuplicateKeyCheck {
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GenericVisitor<'a, &'a Node> for DuplicateKeyCheck {
    type Error = Infallible;

    fn visit_node(
        &mut self,
        node: &'a Node,
        path: &NodePath<'a, &'a Node>,
    ) -> Result<Control, Infallible> {
        let Some(entries) = node.as_mapping() else {
            return Ok(Control::Continue);
        };

        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.key.text()) {
                tracing::trace!(path = %path.pointer(), key = entry.key.text(), "duplicate key");
                self.diagnostics.push(Diagnostic::warning(
                    "duplicate-keys",
                    format!(
                        "duplicate key `{}`, only the first occurrence is used",
                        entry.key.text()
                    ),
                    entry.key.range(),
                ));
            }
        }
        Ok(Control::Continue)
    }
}

impl<'a> GenericCheck<'a> for DuplicateKeyCheck {
    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
