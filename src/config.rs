use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, TokenizeError};

/// Thresholds for deciding that an identifier-shaped run is a key rather than words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyHeuristic {
    /// Minimum length of an all-hex run (with at least one digit)
    pub min_hex_length: usize,
    /// Minimum length of a run mixing ASCII letters and digits
    pub min_mixed_length: usize,
    /// Minimum length of a base64-looking run
    pub min_base64_length: usize,
    /// Minimum length of a letters-only run without any vowel
    pub min_vowelless_length: usize,
}

impl Default for KeyHeuristic {
    fn default() -> Self {
        Self {
            min_hex_length: 8,
            min_mixed_length: 6,
            min_base64_length: 20,
            min_vowelless_length: 6,
        }
    }
}

/// Configuration for tokenizer behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Keep URI runs out of the term sequence
    pub skip_uri: bool,
    /// Keep key-like runs out of the term sequence
    pub skip_key: bool,
    /// Word runs shorter than this many characters are not terms
    pub min_term_length: usize,
    /// Buffer size for line reading (default: 8KB)
    pub buffer_size: usize,
    pub key_heuristic: KeyHeuristic,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            skip_uri: true,
            skip_key: true,
            min_term_length: 3,
            buffer_size: 8192,
            key_heuristic: KeyHeuristic::default(),
        }
    }
}

impl TokenizerConfig {
    /// Parse a config from JSON text; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading tokenizer config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| TokenizeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert!(config.skip_uri);
        assert!(config.skip_key);
        assert_eq!(config.min_term_length, 3);
        assert_eq!(config.key_heuristic.min_mixed_length, 6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TokenizerConfig::from_json_str(
            r#"{"skip_uri": false, "key_heuristic": {"min_hex_length": 12}}"#,
        )
        .unwrap();

        assert!(!config.skip_uri);
        assert!(config.skip_key);
        assert_eq!(config.key_heuristic.min_hex_length, 12);
        assert_eq!(config.key_heuristic.min_mixed_length, 6);
        assert_eq!(config.buffer_size, 8192);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = TokenizerConfig::from_json_str("{ skip_uri: ");
        assert!(matches!(result, Err(TokenizeError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("spellr.json");
        fs::write(&path, r#"{"min_term_length": 1}"#).unwrap();

        let config = TokenizerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.min_term_length, 1);

        let missing = TokenizerConfig::from_json_file(temp_dir.path().join("nope.json"));
        assert!(missing.unwrap_err().is_io());
    }
}
