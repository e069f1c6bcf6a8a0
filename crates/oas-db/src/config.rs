use serde::Deserialize;

/// Which checks run on a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckConfig {
    pub unrecognized: UnrecognizedMode,
    /// Report keys that occur more than once in the same mapping.
    pub duplicate_keys: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { unrecognized: UnrecognizedMode::default(), duplicate_keys: true }
    }
}

impl CheckConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// What runs on a document without a supported `openapi` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnrecognizedMode {
    /// Only the diagnostic saying the document was not recognized.
    #[default]
    RecognitionOnly,
    /// The recognition diagnostic plus every enabled generic check.
    AllGenericChecks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        assert_eq!(CheckConfig::from_json("{}").unwrap(), CheckConfig::default());
        assert!(CheckConfig::default().duplicate_keys);
    }

    #[test]
    fn kebab_case_fields() {
        let config = CheckConfig::from_json(
            r#"{"unrecognized": "all-generic-checks", "duplicate-keys": false}"#,
        )
        .unwrap();
        assert_eq!(config.unrecognized, UnrecognizedMode::AllGenericChecks);
        assert!(!config.duplicate_keys);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CheckConfig::from_json(r#"{"duplicates": false}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `duplicates`"));
    }
}
