//! Record module - the atomic output unit of mapping extraction

use crate::{FieldMapping, MappingKind};
use serde::{Deserialize, Serialize};

/// What is known about the field-level detail of a mapping
///
/// A record either carries explicit field correspondences or is implicit
/// (the mapping exists but no field detail could be derived).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldCoverage {
    /// Field correspondences in textual discovery order
    Explicit(Vec<FieldMapping>),

    /// Mapping declared without field detail (matching names assumed)
    Implicit,
}

/// A mapping between two Java types, as recovered from source text
///
/// Records are built once and never mutated afterwards; the builder-style
/// methods consume `self`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordWire", into = "RecordWire")]
pub struct MappingRecord {
    /// Which extractor produced the record
    pub kind: MappingKind,

    /// Source type name as written in the Java source
    pub source_type: String,

    /// Target type name as written in the Java source
    pub target_type: String,

    /// Declaring `@Mapper` interface (MapStruct records)
    pub interface_name: Option<String>,

    /// Mapping method name
    pub method_name: Option<String>,

    /// Field-level detail
    pub coverage: FieldCoverage,
}

impl MappingRecord {
    /// Create a new record, enforcing the record invariants
    ///
    /// # Examples
    ///
    /// ```
    /// use mapwise_domain::{FieldCoverage, FieldMapping, MappingKind, MappingRecord};
    ///
    /// let record = MappingRecord::new(
    ///     MappingKind::MapStruct,
    ///     "User",
    ///     "UserDTO",
    ///     FieldCoverage::Explicit(vec![FieldMapping::direct("firstName", "name")]),
    /// )
    /// .unwrap()
    /// .with_interface("UserMapper")
    /// .with_method("toDTO");
    ///
    /// assert_eq!(record.field_mappings().len(), 1);
    /// assert!(!record.is_implicit());
    /// ```
    pub fn new(
        kind: MappingKind,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
        coverage: FieldCoverage,
    ) -> Result<Self, String> {
        let record = Self {
            kind,
            source_type: source_type.into(),
            target_type: target_type.into(),
            interface_name: None,
            method_name: None,
            coverage,
        };
        record.validate()?;
        Ok(record)
    }

    /// Set the declaring interface
    pub fn with_interface(mut self, interface_name: impl Into<String>) -> Self {
        self.interface_name = Some(interface_name.into());
        self
    }

    /// Set the mapping method name
    pub fn with_method(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    /// Field mappings in discovery order (empty for implicit records)
    pub fn field_mappings(&self) -> &[FieldMapping] {
        match &self.coverage {
            FieldCoverage::Explicit(fields) => fields,
            FieldCoverage::Implicit => &[],
        }
    }

    /// Whether the record is implicit
    pub fn is_implicit(&self) -> bool {
        matches!(self.coverage, FieldCoverage::Implicit)
    }

    /// Check the record invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.source_type.trim().is_empty() {
            return Err("Mapping record has an empty source type".to_string());
        }
        if self.target_type.trim().is_empty() {
            return Err("Mapping record has an empty target type".to_string());
        }
        if let FieldCoverage::Explicit(fields) = &self.coverage {
            if fields.is_empty() {
                return Err(format!(
                    "Explicit mapping {} -> {} has no field mappings",
                    self.source_type, self.target_type
                ));
            }
            if let Some(fm) = fields.iter().find(|fm| fm.target_field.trim().is_empty()) {
                return Err(format!(
                    "Field mapping from {:?} has an empty target field",
                    fm.source_field
                ));
            }
        }
        Ok(())
    }
}

/// Flat serialized shape of a record
#[derive(Serialize, Deserialize)]
struct RecordWire {
    #[serde(rename = "type", alias = "mapping_type")]
    kind: MappingKind,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "interface_name")]
    interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "method_name")]
    method: Option<String>,
    source_type: String,
    target_type: String,
    #[serde(default)]
    field_mappings: Vec<FieldMapping>,
    #[serde(default)]
    implicit: bool,
}

impl TryFrom<RecordWire> for MappingRecord {
    type Error = String;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        let coverage = match (wire.implicit, wire.field_mappings.is_empty()) {
            (true, true) => FieldCoverage::Implicit,
            (true, false) => {
                return Err("Implicit mapping record cannot carry field mappings".to_string())
            }
            (false, _) => FieldCoverage::Explicit(wire.field_mappings),
        };

        let record = Self {
            kind: wire.kind,
            source_type: wire.source_type,
            target_type: wire.target_type,
            interface_name: wire.interface,
            method_name: wire.method,
            coverage,
        };
        record.validate()?;
        Ok(record)
    }
}

impl From<MappingRecord> for RecordWire {
    fn from(record: MappingRecord) -> Self {
        let implicit = record.is_implicit();
        let field_mappings = match record.coverage {
            FieldCoverage::Explicit(fields) => fields,
            FieldCoverage::Implicit => Vec::new(),
        };
        Self {
            kind: record.kind,
            interface: record.interface_name,
            method: record.method_name,
            source_type: record.source_type,
            target_type: record.target_type,
            field_mappings,
            implicit,
        }
    }
}
