//! Error types for the mapping extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur around extraction
///
/// Extraction over text never fails; these cover reading files, the
/// optional LLM path and configuration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A source file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Invalid mapping format in LLM response
    #[error("Invalid mapping format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_file() {
        let err = ExtractorError::Io {
            path: PathBuf::from("src/UserMapper.java"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("src/UserMapper.java"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ExtractorError = json_err.into();
        assert!(matches!(err, ExtractorError::JsonParse(_)));
    }
}
