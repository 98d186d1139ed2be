//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction engine and the
//! collaborators around it (model-serving clients, ingestion, retrieval).

use crate::MappingRecord;

/// Trait for LLM provider operations
///
/// Implemented outside the engine by whatever client talks to the
/// model-serving endpoint.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for extracting mapping records from Java source text
///
/// Extraction is best-effort and never fails: text without recognizable
/// mappings yields an empty list.
pub trait MappingExtractor {
    /// Extract mapping records from one source text
    fn extract(&self, text: &str) -> Vec<MappingRecord>;
}
