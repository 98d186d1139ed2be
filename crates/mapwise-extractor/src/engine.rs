//! The rule-based mapping engine

use crate::assignments::AssignmentLimits;
use crate::config::ExtractorConfig;
use crate::declarations::{extract_classes, extract_interfaces};
use crate::error::ExtractorError;
use crate::mapstruct::extract_mapstruct_mappings;
use crate::normalize::assemble;
use crate::pojo::extract_pojo_mappings;
use crate::types::{ExtractionResult, ParsedSource};
use mapwise_domain::{MappingExtractor, MappingRecord};
use tracing::{debug, info};

/// File name recorded when text is extracted without a path
pub const INLINE_FILE: &str = "inline";

/// Extracts MapStruct and POJO mappings from Java source text
///
/// The engine holds only its configuration; every call is a pure function of
/// the text it is given, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MappingEngine {
    config: ExtractorConfig,
}

impl MappingEngine {
    /// Create an engine with a validated configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn limits(&self) -> AssignmentLimits {
        AssignmentLimits {
            max_literal_len: self.config.max_literal_len,
            value_preview_len: self.config.value_preview_len,
        }
    }

    /// Run every extractor over `text` and keep the raw findings
    pub fn parse_content(&self, text: &str, file_path: &str) -> ParsedSource {
        let mapstruct = extract_mapstruct_mappings(text, self.config.annotation_window_lines);
        let pojo = extract_pojo_mappings(text, self.limits());
        debug!(
            "Parsed {}: {} MapStruct hits, {} POJO hits",
            file_path,
            mapstruct.len(),
            pojo.len()
        );

        ParsedSource {
            file: file_path.to_string(),
            mapstruct,
            pojo,
            classes: extract_classes(text),
            interfaces: extract_interfaces(text),
        }
    }

    /// Extract assembled mapping records from `text`
    pub fn extract(&self, text: &str, file_path: &str) -> ExtractionResult {
        let file = if file_path.is_empty() {
            INLINE_FILE
        } else {
            file_path
        };
        let parsed = self.parse_content(text, file);
        let result = ExtractionResult::new(file, assemble(&parsed.mapstruct, &parsed.pojo));

        info!(
            "Extracted {} mappings from {} ({} MapStruct, {} POJO)",
            result.summary.total_mappings,
            result.file,
            result.summary.mapstruct_mappings,
            result.summary.pojo_mappings
        );
        result
    }
}

impl MappingExtractor for MappingEngine {
    fn extract(&self, text: &str) -> Vec<MappingRecord> {
        MappingEngine::extract(self, text, INLINE_FILE).mappings
    }
}

/// Extract mappings from `text` with the default configuration
///
/// # Examples
///
/// ```
/// use mapwise_extractor::extract_mappings;
///
/// let code = r#"@Mapper interface UserMapper {
///     @Mapping(source = "firstName", target = "name")
///     UserDTO toDTO(User user);
/// }"#;
///
/// let result = extract_mappings(code, "UserMapper.java");
/// assert_eq!(result.summary.mapstruct_mappings, 1);
/// assert_eq!(result.mappings[0].field_mappings()[0].target_field, "name");
/// ```
pub fn extract_mappings(text: &str, file_path: &str) -> ExtractionResult {
    MappingEngine::default().extract(text, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ExtractorConfig {
            annotation_window_lines: 0,
            ..ExtractorConfig::default()
        };
        assert!(matches!(MappingEngine::new(config), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_empty_path_is_inline() {
        let result = extract_mappings("class Empty {}", "");
        assert_eq!(result.file, INLINE_FILE);
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_content_collects_declarations() {
        let engine = MappingEngine::default();
        let parsed = engine.parse_content(
            "@Mapper interface M { B toB(A a); } class Impl { }",
            "M.java",
        );
        assert_eq!(parsed.mapstruct.len(), 1);
        assert_eq!(parsed.interfaces[0].name, "M");
        assert_eq!(parsed.classes[0].name, "Impl");
    }

    #[test]
    fn test_trait_object_extraction() {
        let engine: Box<dyn MappingExtractor> = Box::new(MappingEngine::default());
        let records = engine.extract("@Mapper interface M { B toB(A a); }");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_implicit());
    }
}
