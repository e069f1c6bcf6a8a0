/// A document that cannot be interpreted as a model at all.
///
/// Content that merely breaks OpenAPI rules never produces one of
/// these; it is kept in the tree for rule engines to report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("cannot build model at `{path}`: {reason}")]
    Construction { path: String, reason: String },
    #[error("document nests too deeply at `{path}`")]
    TooDeep { path: String },
}

impl ModelError {
    /// JSON Pointer of the node the error is about.
    pub fn path(&self) -> &str {
        match self {
            Self::Construction { path, .. } | Self::TooDeep { path } => path,
        }
    }
}
