//! Configuration for the mapping extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of lines searched backward from a mapper method for
/// `@Mapping` annotations
pub const DEFAULT_ANNOTATION_WINDOW_LINES: usize = 50;

/// Configuration for the mapping extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Lines searched backward from a MapStruct method for annotations
    pub annotation_window_lines: usize,

    /// Literal setter arguments shorter than this are kept verbatim as the source
    pub max_literal_len: usize,

    /// Maximum characters of an inner setter argument kept as the expression
    pub value_preview_len: usize,

    /// Whether on-demand extraction asks the LLM first
    pub use_llm: bool,

    /// Maximum characters of code embedded in an LLM extraction prompt
    pub llm_code_limit: usize,

    /// Maximum time for a single LLM extraction call (seconds)
    pub llm_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the LLM timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.annotation_window_lines == 0 {
            return Err("annotation_window_lines must be greater than 0".to_string());
        }
        if self.max_literal_len == 0 {
            return Err("max_literal_len must be greater than 0".to_string());
        }
        if self.value_preview_len == 0 {
            return Err("value_preview_len must be greater than 0".to_string());
        }
        if self.llm_code_limit == 0 {
            return Err("llm_code_limit must be greater than 0".to_string());
        }
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Load and validate configuration from TOML string
    pub fn load(toml_str: &str) -> Result<Self, ExtractorError> {
        let config = Self::from_toml(toml_str).map_err(ExtractorError::Config)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            annotation_window_lines: DEFAULT_ANNOTATION_WINDOW_LINES,
            max_literal_len: 50,
            value_preview_len: 100,
            use_llm: false,
            llm_code_limit: 8_000,
            llm_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.annotation_window_lines, 50);
    }

    #[test]
    fn test_invalid_window() {
        let mut config = ExtractorConfig::default();
        config.annotation_window_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = ExtractorConfig::default();
        config.llm_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("annotation_window_lines = 80\nuse_llm = true\n").unwrap();
        assert_eq!(parsed.annotation_window_lines, 80);
        assert!(parsed.use_llm);
        assert_eq!(parsed.value_preview_len, 100);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let err = ExtractorConfig::load("max_literal_len = 0\n").unwrap_err();
        assert!(matches!(err, ExtractorError::Config(_)));
    }
}
