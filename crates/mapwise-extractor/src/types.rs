//! Request and response types for extraction

use mapwise_domain::{FieldMapping, MappingKind, MappingRecord};
use serde::{Deserialize, Serialize};

/// Arguments of one `@Mapping(...)` annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingArgs {
    /// `source = "..."`
    pub source: Option<String>,

    /// `target = "..."` (annotations without a target are discarded)
    pub target: String,

    /// `expression = "..."`
    pub expression: Option<String>,

    /// `ignore = true`
    pub ignore: bool,
}

impl MappingArgs {
    /// Convert to a field mapping
    pub fn to_field_mapping(&self) -> FieldMapping {
        FieldMapping::new(self.source.clone(), self.target.clone())
            .with_expression(self.expression.clone())
            .with_ignore(self.ignore)
    }
}

/// How a MapStruct method was bound to field detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBinding {
    /// One `@Mapping` annotation preceding the method
    Annotated(MappingArgs),

    /// No annotation found; field names assumed to match
    Implicit,
}

/// One raw MapStruct finding: a method plus one annotation (or none)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapstructHit {
    /// Declaring `@Mapper` interface
    pub interface_name: String,

    /// Abstract method name
    pub method_name: String,

    /// Declared type of the source parameter
    pub source_type: String,

    /// Return type, or the `@MappingTarget` parameter type for void updates
    pub target_type: String,

    /// Field detail for this hit
    pub binding: MethodBinding,
}

/// Which signature rule recognized a hand-written mapping method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureRule {
    /// `void mapXxx(Source src, Target tgt)`
    VoidWithTarget,
    /// `Target mapXxx(Source src)`
    TypedReturn,
    /// `void mapXxx(Source src)` with the target found in the body
    VoidSingleParam,
    /// `Target convertXxx(Source src)` and friends
    ConventionalName,
}

/// One raw POJO finding: a mapping method and the fields it assigns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PojoHit {
    /// Method name
    pub method_name: String,

    /// Declared return type (`void` for in-place mappers)
    pub return_type: String,

    /// Declared type of the source parameter
    pub source_type: String,

    /// Name of the source parameter
    pub source_var: String,

    /// Type being populated
    pub target_type: String,

    /// Variable being populated, when it could be determined
    pub target_var: Option<String>,

    /// Rule that recognized the method
    pub rule: SignatureRule,

    /// Field mappings in discovery order (never empty)
    pub fields: Vec<FieldMapping>,
}

/// A class or interface declaration and where it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declared name
    pub name: String,

    /// Byte offset of the declaration in the source text
    pub offset: usize,
}

/// Everything the parser recovers from one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    /// File the text came from
    pub file: String,

    /// Raw MapStruct findings
    pub mapstruct: Vec<MapstructHit>,

    /// Raw POJO findings
    pub pojo: Vec<PojoHit>,

    /// Class declarations
    pub classes: Vec<Declaration>,

    /// Interface declarations
    pub interfaces: Vec<Declaration>,
}

/// Per-file mapping counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// All records
    pub total_mappings: usize,

    /// MapStruct records
    pub mapstruct_mappings: usize,

    /// POJO records
    pub pojo_mappings: usize,
}

impl ExtractionSummary {
    /// Count records by kind
    pub fn from_records(records: &[MappingRecord]) -> Self {
        let mapstruct_mappings = records
            .iter()
            .filter(|r| r.kind == MappingKind::MapStruct)
            .count();
        Self {
            total_mappings: records.len(),
            mapstruct_mappings,
            pojo_mappings: records.len() - mapstruct_mappings,
        }
    }
}

/// Result of extracting one source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// File the text came from (`inline` when none was given)
    pub file: String,

    /// Records in discovery order, MapStruct first
    pub mappings: Vec<MappingRecord>,

    /// Counts by kind
    pub summary: ExtractionSummary,
}

impl ExtractionResult {
    /// Build a result, computing the summary from the records
    pub fn new(file: impl Into<String>, mappings: Vec<MappingRecord>) -> Self {
        let summary = ExtractionSummary::from_records(&mappings);
        Self {
            file: file.into(),
            mappings,
            summary,
        }
    }

    /// Whether no mapping was found
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// A code chunk handed over by the retrieval layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text (may be cut mid-method)
    #[serde(default, alias = "document")]
    pub code: String,

    /// File the chunk was taken from
    #[serde(default)]
    pub file_path: Option<String>,

    /// Position of the chunk within its file
    #[serde(default)]
    pub chunk_index: Option<usize>,

    /// Number of chunks the file was split into
    #[serde(default)]
    pub total_chunks: Option<usize>,

    /// Embedding distance reported by the retrieval layer
    #[serde(default)]
    pub distance: Option<f64>,
}

impl RetrievedChunk {
    /// Create a chunk from code and an optional file path
    pub fn new(code: impl Into<String>, file_path: Option<String>) -> Self {
        Self {
            code: code.into(),
            file_path,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapwise_domain::FieldCoverage;

    #[test]
    fn test_summary_counts_by_kind() {
        let records = vec![
            MappingRecord::new(MappingKind::MapStruct, "A", "B", FieldCoverage::Implicit).unwrap(),
            MappingRecord::new(
                MappingKind::Pojo,
                "C",
                "D",
                FieldCoverage::Explicit(vec![FieldMapping::direct("x", "x")]),
            )
            .unwrap(),
            MappingRecord::new(MappingKind::MapStruct, "E", "F", FieldCoverage::Implicit).unwrap(),
        ];
        let summary = ExtractionSummary::from_records(&records);
        assert_eq!(summary.total_mappings, 3);
        assert_eq!(summary.mapstruct_mappings, 2);
        assert_eq!(summary.pojo_mappings, 1);
    }

    #[test]
    fn test_chunk_accepts_document_alias() {
        let chunk: RetrievedChunk =
            serde_json::from_str(r#"{"document": "class A {}", "distance": 0.25}"#).unwrap();
        assert_eq!(chunk.code, "class A {}");
        assert_eq!(chunk.distance, Some(0.25));
        assert!(chunk.file_path.is_none());
    }

    #[test]
    fn test_args_to_field_mapping() {
        let args = MappingArgs {
            source: None,
            target: "id".to_string(),
            expression: None,
            ignore: true,
        };
        let fm = args.to_field_mapping();
        assert!(fm.ignore);
        assert!(fm.source_field.is_none());
        assert_eq!(fm.target_field, "id");
    }
}
