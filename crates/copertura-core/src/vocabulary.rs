use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Built-in street-prefix vocabulary, used when no override file is configured.
const DEFAULT_VOCABULARY: &str = include_str!("../data/street_prefixes.yaml");

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    pub prefixes: Vec<String>,
}

/// Read-only set of street-type prefixes, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixVocabulary {
    prefixes: HashSet<String>,
}

impl PrefixVocabulary {
    /// Parse and validate a vocabulary from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::VocabularyFileParse` on malformed YAML and
    /// `ConfigError::Validation` when an entry is empty, contains whitespace,
    /// or duplicates another entry case-insensitively.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: VocabularyFile = serde_yaml::from_str(content)?;
        Self::from_entries(file.prefixes)
    }

    /// Build a vocabulary from raw entries, applying the same validation as
    /// [`PrefixVocabulary::from_yaml`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for empty, multi-token, or duplicate entries.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes = HashSet::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                return Err(ConfigError::Validation(
                    "prefix entries must be non-empty".to_string(),
                ));
            }
            if entry.split_whitespace().count() > 1 {
                return Err(ConfigError::Validation(format!(
                    "prefix '{entry}' must be a single token"
                )));
            }
            if !prefixes.insert(entry.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate prefix: '{entry}'"
                )));
            }
        }

        if prefixes.is_empty() {
            return Err(ConfigError::Validation(
                "vocabulary must contain at least one prefix".to_string(),
            ));
        }

        Ok(Self { prefixes })
    }

    /// The vocabulary shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded YAML is broken, which the tests guard against.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(DEFAULT_VOCABULARY)
    }

    /// Case-insensitive membership test for a single token.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.prefixes.contains(&token.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Load the prefix vocabulary from `path`, or the built-in one when `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vocabulary(path: Option<&Path>) -> Result<PrefixVocabulary, ConfigError> {
    let Some(path) = path else {
        return PrefixVocabulary::builtin();
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    PrefixVocabulary::from_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_vocabulary_parses() {
        let vocab = PrefixVocabulary::builtin().expect("embedded vocabulary must be valid");
        assert!(vocab.contains("via"));
        assert!(vocab.contains("corso"));
        assert!(vocab.contains("piazza"));
        assert!(vocab.len() > 10);
    }

    #[test]
    fn contains_is_case_insensitive() {
        let vocab = PrefixVocabulary::from_entries(["Via", "CORSO"]).unwrap();
        assert!(vocab.contains("via"));
        assert!(vocab.contains("VIA"));
        assert!(vocab.contains("Corso"));
        assert!(!vocab.contains("Rossi"));
    }

    #[test]
    fn contains_handles_accented_tokens() {
        let vocab = PrefixVocabulary::builtin().unwrap();
        assert!(vocab.contains("LOCALITÀ"));
    }

    #[test]
    fn rejects_duplicate_prefixes_ignoring_case() {
        let err = PrefixVocabulary::from_entries(["via", "Via"]).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "got: {err:?}"
        );
    }

    #[test]
    fn rejects_multi_token_prefix() {
        let err = PrefixVocabulary::from_entries(["via privata"]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_empty_vocabulary() {
        let err = PrefixVocabulary::from_yaml("prefixes: []").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = PrefixVocabulary::from_yaml("prefixes: [via").unwrap_err();
        assert!(matches!(err, ConfigError::VocabularyFileParse(_)), "got: {err:?}");
    }

    #[test]
    fn load_vocabulary_without_path_uses_builtin() {
        let vocab = load_vocabulary(None).unwrap();
        assert_eq!(vocab, PrefixVocabulary::builtin().unwrap());
    }

    #[test]
    fn load_vocabulary_reports_missing_file() {
        let err = load_vocabulary(Some(Path::new("/nonexistent/prefixes.yaml"))).unwrap_err();
        assert!(
            matches!(err, ConfigError::VocabularyFileIo { ref path, .. } if path.contains("prefixes.yaml")),
            "got: {err:?}"
        );
    }
}
