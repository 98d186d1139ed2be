//! Mapwise Domain Layer
//!
//! This crate contains the data model for field-level mapping relationships
//! recovered from Java source, and the trait interfaces that the extraction
//! engine and its collaborators depend upon. Its only external dependency is
//! `serde`, so records can cross into storage and retrieval layers.
//!
//! ## Key Concepts
//!
//! - **MappingRecord**: one mapping between a source type and a target type
//! - **FieldMapping**: a single source-field to target-field correspondence
//! - **FieldCoverage**: explicit field detail, or an implicit mapping
//! - **MappingKind**: MapStruct (annotation-driven) or POJO (hand-written)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod kind;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use field::FieldMapping;
pub use kind::MappingKind;
pub use record::{FieldCoverage, MappingRecord};
pub use traits::{LlmProvider, MappingExtractor};
