use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A message about a document, anchored at a byte range of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    check: &'static str,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn error(check: &'static str, message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Error, check, message: message.into(), range }
    }

    pub fn warning(check: &'static str, message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Warning, check, message: message.into(), range }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Name of the check that produced this diagnostic.
    pub fn check(&self) -> &'static str {
        self.check
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let message = level.title(&self.message).id(self.check).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn render_names_check_location_and_message() {
        let text = "{\n  \"openapi\": 3\n}\n";
        let start = TextSize::new(text.find('3').unwrap() as u32);
        let diagnostic = Diagnostic::error(
            "recognition",
            "`openapi` must be a string",
            TextRange::at(start, 1.into()),
        );

        let rendered = diagnostic.render(&Renderer::plain(), "api.json", text).to_string();
        assert!(rendered.starts_with("error[recognition]: `openapi` must be a string"));
        assert!(rendered.contains("api.json:2:14"));
        assert!(rendered.contains("\"openapi\": 3"));
        assert!(rendered.contains("^ here"));
    }

    #[test]
    fn warnings_keep_their_severity() {
        let diagnostic = Diagnostic::warning("duplicate-key", "duplicate key `a`", TextRange::default());
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert_eq!(diagnostic.check(), "duplicate-key");
        let rendered = diagnostic.render(&Renderer::plain(), "api.json", "{}").to_string();
        assert!(rendered.starts_with("warning[duplicate-key]: duplicate key `a`"));
    }
}
