//! Text and JSON rendering of extraction results

use crate::error::ExtractorError;
use crate::types::ExtractionResult;

/// Render a result as a human-readable report
pub fn render_text(result: &ExtractionResult) -> String {
    let mut lines = vec![
        format!("File: {}", result.file),
        format!("Total Mappings: {}", result.summary.total_mappings),
        format!("  - MapStruct: {}", result.summary.mapstruct_mappings),
        format!("  - POJO: {}", result.summary.pojo_mappings),
        String::new(),
    ];

    for (i, mapping) in result.mappings.iter().enumerate() {
        lines.push(format!(
            "Mapping {}: {}",
            i + 1,
            mapping.kind.as_str().to_uppercase()
        ));
        lines.push(format!("  Source Type: {}", mapping.source_type));
        lines.push(format!("  Target Type: {}", mapping.target_type));
        if let Some(interface) = &mapping.interface_name {
            lines.push(format!("  Interface: {}", interface));
        }
        if let Some(method) = &mapping.method_name {
            lines.push(format!("  Method: {}", method));
        }

        if mapping.is_implicit() {
            lines.push("  Implicit mapping (field names match)".to_string());
        } else {
            lines.push("  Field Mappings:".to_string());
            for fm in mapping.field_mappings() {
                lines.push(format!(
                    "    {} -> {}",
                    fm.source_field.as_deref().unwrap_or("N/A"),
                    fm.target_field
                ));
                if let Some(expression) = &fm.expression {
                    lines.push(format!("      Expression: {}", expression));
                }
                if fm.ignore {
                    lines.push("      (IGNORED)".to_string());
                }
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render a result as pretty-printed JSON
pub fn render_json(result: &ExtractionResult) -> Result<String, ExtractorError> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapwise_domain::{FieldCoverage, FieldMapping, MappingKind, MappingRecord};

    fn sample() -> ExtractionResult {
        let explicit = MappingRecord::new(
            MappingKind::MapStruct,
            "Car",
            "CarDto",
            FieldCoverage::Explicit(vec![
                FieldMapping::direct("make", "manufacturer"),
                FieldMapping::new(None, "id").with_ignore(true),
                FieldMapping::new(None, "createdAt").with_expression(Some("java(now())".to_string())),
            ]),
        )
        .unwrap()
        .with_interface("CarMapper")
        .with_method("toDto");
        let implicit =
            MappingRecord::new(MappingKind::MapStruct, "Person", "PersonDto", FieldCoverage::Implicit)
                .unwrap()
                .with_interface("CarMapper")
                .with_method("toPersonDto");
        ExtractionResult::new("CarMapper.java", vec![explicit, implicit])
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        assert!(text.starts_with("File: CarMapper.java\nTotal Mappings: 2\n  - MapStruct: 2\n  - POJO: 0\n"));
        assert!(text.contains("Mapping 1: MAPSTRUCT"));
        assert!(text.contains("    make -> manufacturer"));
        assert!(text.contains("    N/A -> id\n      (IGNORED)"));
        assert!(text.contains("      Expression: java(now())"));
        assert!(text.contains("Mapping 2: MAPSTRUCT\n  Source Type: Person"));
        assert!(text.contains("  Implicit mapping (field names match)"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_mappings"], 2);
        assert_eq!(value["mappings"][0]["interface"], "CarMapper");
        assert_eq!(value["mappings"][1]["implicit"], true);
    }
}
