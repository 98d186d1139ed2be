//! Mapwise Extractor
//!
//! Recovers field-level mapping relationships from Java source text without a
//! Java AST.
//!
//! # Overview
//!
//! Two kinds of mappings are recognized:
//!
//! - **MapStruct**: `@Mapper` interfaces whose abstract methods carry
//!   `@Mapping` / `@Mappings` annotations, or none (implicit mappings)
//! - **POJO**: hand-written mapping methods, analyzed for setter/getter
//!   pairs, direct assignments and multi-hop assignments through locals,
//!   lists and nested objects
//!
//! Extraction is lexical and best-effort. It never fails on unusual or
//! truncated input; unresolvable sources become sentinels (`unknown`,
//! `constant`, `constant:NAME`).
//!
//! # Architecture
//!
//! ```text
//! Java text → scanner / annotation / mapstruct / pojo → normalize → ExtractionResult
//! ```
//!
//! Around the engine sit file and batch entry points, on-demand extraction
//! over retrieved chunks (optionally LLM-assisted), JSON key normalization,
//! storage fingerprints and text/JSON rendering.
//!
//! # Example Usage
//!
//! ```
//! use mapwise_extractor::{render_text, ExtractorConfig, MappingEngine};
//!
//! # fn example() -> Result<(), mapwise_extractor::ExtractorError> {
//! let engine = MappingEngine::new(ExtractorConfig::default())?;
//!
//! let code = r#"
//!     ProductDTO map(Product product) {
//!         ProductDTO dto = new ProductDTO();
//!         dto.setName(product.getName());
//!         return dto;
//!     }
//! "#;
//!
//! let result = engine.extract(code, "ProductMapper.java");
//! assert_eq!(result.summary.pojo_mappings, 1);
//! println!("{}", render_text(&result));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod annotation;
mod assignments;
mod batch;
mod config;
mod declarations;
mod engine;
mod error;
mod mapstruct;
mod naming;
mod normalize;
mod on_demand;
mod parser;
mod pojo;
mod prompt;
mod render;
mod scanner;
mod signature;
mod types;


pub use annotation::extract_mapping_annotations;
pub use assignments::{extract_field_assignments, AssignmentLimits};
pub use config::{ExtractorConfig, DEFAULT_ANNOTATION_WINDOW_LINES};
pub use declarations::{extract_classes, extract_interfaces};
pub use engine::{extract_mappings, MappingEngine, INLINE_FILE};
pub use error::ExtractorError;
pub use mapstruct::{extract_mapstruct_mappings, UNKNOWN_TYPE};
pub use naming::{constant_to_camel, is_constant_identifier, lower_first};
pub use normalize::{
    assemble, mapping_fingerprint, normalize_field_mapping_value, normalize_result_value,
};
pub use on_demand::{NoLlm, OnDemandExtractor};
pub use pojo::extract_pojo_mappings;
pub use render::{render_json, render_text};
pub use scanner::{find_block_end, find_paren_end};
pub use types::{
    Declaration, ExtractionResult, ExtractionSummary, MappingArgs, MapstructHit, MethodBinding,
    ParsedSource, PojoHit, RetrievedChunk, SignatureRule,
};

pub use mapwise_domain::{FieldCoverage, FieldMapping, MappingKind, MappingRecord};
