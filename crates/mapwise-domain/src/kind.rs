//! Kind module - which extractor produced a mapping record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a mapping record
///
/// - MapStruct: declared by an `@Mapper` interface method
/// - Pojo: recovered from a hand-written mapping method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MappingKind {
    /// Annotation-driven MapStruct mapping
    #[serde(rename = "mapstruct")]
    MapStruct,

    /// Hand-written POJO-to-POJO mapping
    #[serde(rename = "pojo")]
    Pojo,
}

impl MappingKind {
    /// Get the kind name as it appears in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingKind::MapStruct => "mapstruct",
            MappingKind::Pojo => "pojo",
        }
    }

    /// Parse a kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mapstruct" => Some(MappingKind::MapStruct),
            "pojo" => Some(MappingKind::Pojo),
            _ => None,
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
