//! On-demand extraction over retrieved code chunks
//!
//! The retrieval layer hands over chunks that may be cut anywhere. The
//! rule-based engine tolerates that and returns partial or empty results.
//! An optional LLM provider can be asked first; any failure on that path
//! falls back to the engine.

use crate::engine::{MappingEngine, INLINE_FILE};
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionResult, RetrievedChunk};
use mapwise_domain::{LlmProvider, MappingRecord};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Provider type for extractors that never call an LLM
#[derive(Debug, Clone, Copy)]
pub enum NoLlm {}

impl LlmProvider for NoLlm {
    type Error = Infallible;

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        match *self {}
    }
}

/// Extracts mappings at query time, from code rather than files
pub struct OnDemandExtractor<L>
where
    L: LlmProvider,
{
    engine: MappingEngine,
    llm_provider: Option<Arc<L>>,
    use_llm: bool,
}

impl OnDemandExtractor<NoLlm> {
    /// Create an extractor that only uses the rule-based engine
    pub fn parser_only(engine: MappingEngine) -> Self {
        Self {
            engine,
            llm_provider: None,
            use_llm: false,
        }
    }
}

impl<L> OnDemandExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an extractor with an LLM provider
    ///
    /// The LLM is used by default only when the engine configuration says so.
    pub fn new(llm_provider: L, engine: MappingEngine) -> Self {
        let use_llm = engine.config().use_llm;
        Self {
            engine,
            llm_provider: Some(Arc::new(llm_provider)),
            use_llm,
        }
    }

    /// Override the default extraction mode
    pub fn with_use_llm(mut self, use_llm: bool) -> Self {
        self.use_llm = use_llm;
        self
    }

    /// Whether extraction asks the LLM unless told otherwise
    pub fn uses_llm(&self) -> bool {
        self.use_llm && self.llm_provider.is_some()
    }

    /// Rule-based extraction; never fails
    pub fn extract_with_parser(&self, code: &str, file_path: Option<&str>) -> ExtractionResult {
        self.engine.extract(code, file_path.unwrap_or(INLINE_FILE))
    }

    /// Extract mappings from code, by LLM or by the engine
    ///
    /// `use_llm` overrides the default mode for this call. LLM errors,
    /// timeouts and unparseable answers fall back to the engine.
    pub async fn extract_from_code(
        &self,
        code: &str,
        file_path: Option<&str>,
        use_llm: Option<bool>,
    ) -> ExtractionResult {
        let use_llm = use_llm.unwrap_or(self.use_llm) && self.llm_provider.is_some();
        if !use_llm {
            return self.extract_with_parser(code, file_path);
        }

        match self.extract_with_llm(code, file_path).await {
            Ok(result) => result,
            Err(e) => {
                warn!("LLM extraction failed, using parser: {}", e);
                self.extract_with_parser(code, file_path)
            }
        }
    }

    /// LLM-only extraction, with errors reported to the caller
    pub async fn extract_with_llm(
        &self,
        code: &str,
        file_path: Option<&str>,
    ) -> Result<ExtractionResult, ExtractorError> {
        let prompt = PromptBuilder::new(code, self.engine.config().llm_code_limit)
            .with_file_path(file_path.map(str::to_string))
            .build();

        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.engine.config().llm_timeout(), self.call_llm(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;

        debug!("LLM response length: {} chars", response.len());

        let records = parse_llm_response(&response)?;
        info!("Parsed {} mapping records from LLM", records.len());

        Ok(ExtractionResult::new(file_path.unwrap_or(INLINE_FILE), records))
    }

    /// Extract from each retrieved chunk and concatenate the records in
    /// chunk order; chunks without code are skipped
    pub async fn extract_from_retrievals(
        &self,
        chunks: &[RetrievedChunk],
        use_llm: Option<bool>,
    ) -> Vec<MappingRecord> {
        let mut records = Vec::new();

        for chunk in chunks {
            if chunk.code.trim().is_empty() {
                continue;
            }
            let result = self
                .extract_from_code(&chunk.code, chunk.file_path.as_deref(), use_llm)
                .await;
            records.extend(result.mappings);
        }

        debug!(
            "Extracted {} records from {} retrieved chunks",
            records.len(),
            chunks.len()
        );
        records
    }

    /// Call the LLM provider
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        let llm = match &self.llm_provider {
            Some(llm) => Arc::clone(llm),
            None => return Err(ExtractorError::Llm("No LLM provider configured".to_string())),
        };
        let prompt = prompt.to_string();

        // LlmProvider is synchronous
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;

    const MAPPER: &str = "@Mapper interface UserMapper { UserDTO toDTO(User user); }";

    #[test]
    fn test_parser_only_never_uses_llm() {
        let extractor = OnDemandExtractor::parser_only(MappingEngine::default());
        assert!(!extractor.uses_llm());
        let result = extractor.extract_with_parser(MAPPER, Some("UserMapper.java"));
        assert_eq!(result.file, "UserMapper.java");
        assert_eq!(result.summary.total_mappings, 1);
    }

    #[tokio::test]
    async fn test_parser_only_ignores_llm_request() {
        let extractor = OnDemandExtractor::parser_only(MappingEngine::default());
        let result = extractor.extract_from_code(MAPPER, None, Some(true)).await;
        assert_eq!(result.file, INLINE_FILE);
        assert_eq!(result.summary.total_mappings, 1);
    }

    #[tokio::test]
    async fn test_llm_without_provider_is_an_error() {
        let extractor = OnDemandExtractor::parser_only(MappingEngine::default());
        let err = extractor.extract_with_llm(MAPPER, None).await.unwrap_err();
        assert!(matches!(err, ExtractorError::Llm(_)));
    }

    #[test]
    fn test_default_mode_follows_config() {
        struct Echo;
        impl LlmProvider for Echo {
            type Error = String;
            fn generate(&self, prompt: &str) -> Result<String, String> {
                Ok(prompt.to_string())
            }
        }

        let config = ExtractorConfig {
            use_llm: true,
            ..ExtractorConfig::default()
        };
        let engine = MappingEngine::new(config).unwrap();
        assert!(OnDemandExtractor::new(Echo, engine.clone()).uses_llm());
        assert!(!OnDemandExtractor::new(Echo, engine).with_use_llm(false).uses_llm());
    }
}
