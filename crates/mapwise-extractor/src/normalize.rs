//! Result assembly, key normalization and storage fingerprints

use crate::types::{MapstructHit, MethodBinding, PojoHit};
use mapwise_domain::{FieldCoverage, FieldMapping, MappingKind, MappingRecord};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Group raw hits into records: one per MapStruct interface+method+types
/// combination, then one per POJO method, each in first-appearance order
pub fn assemble(mapstruct: &[MapstructHit], pojo: &[PojoHit]) -> Vec<MappingRecord> {
    let mut records = group_mapstruct(mapstruct);

    for hit in pojo {
        let record = MappingRecord::new(
            MappingKind::Pojo,
            hit.source_type.as_str(),
            hit.target_type.as_str(),
            FieldCoverage::Explicit(hit.fields.clone()),
        );
        match record {
            Ok(record) => records.push(record.with_method(hit.method_name.as_str())),
            Err(e) => debug!("Discarding POJO method {}: {}", hit.method_name, e),
        }
    }

    records
}

struct MapstructGroup<'a> {
    interface_name: &'a str,
    method_name: &'a str,
    source_type: &'a str,
    target_type: &'a str,
    fields: Vec<FieldMapping>,
}

impl MapstructGroup<'_> {
    fn same_method(&self, hit: &MapstructHit) -> bool {
        self.interface_name == hit.interface_name
            && self.method_name == hit.method_name
            && self.source_type == hit.source_type
            && self.target_type == hit.target_type
    }
}

fn group_mapstruct(hits: &[MapstructHit]) -> Vec<MappingRecord> {
    let mut groups: Vec<MapstructGroup<'_>> = Vec::new();

    for hit in hits {
        let index = match groups.iter().position(|g| g.same_method(hit)) {
            Some(index) => index,
            None => {
                groups.push(MapstructGroup {
                    interface_name: &hit.interface_name,
                    method_name: &hit.method_name,
                    source_type: &hit.source_type,
                    target_type: &hit.target_type,
                    fields: Vec::new(),
                });
                groups.len() - 1
            }
        };
        if let MethodBinding::Annotated(args) = &hit.binding {
            groups[index].fields.push(args.to_field_mapping());
        }
    }

    groups
        .into_iter()
        .filter_map(|group| {
            // explicit detail wins over an implicit overload with the same identity
            let coverage = if group.fields.is_empty() {
                FieldCoverage::Implicit
            } else {
                FieldCoverage::Explicit(group.fields)
            };

            match MappingRecord::new(MappingKind::MapStruct, group.source_type, group.target_type, coverage) {
                Ok(record) => Some(
                    record
                        .with_interface(group.interface_name)
                        .with_method(group.method_name),
                ),
                Err(e) => {
                    debug!(
                        "Discarding {}.{}: {}",
                        group.interface_name, group.method_name, e
                    );
                    None
                }
            }
        })
        .collect()
}

/// Rename `source`/`target` keys to `source_field`/`target_field`
///
/// `expression` and `target_path` are kept when present, `ignore` only when
/// true; any other key passes through untouched. Non-object values are
/// returned unchanged.
pub fn normalize_field_mapping_value(value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return value.clone();
    };

    let pick = |long: &str, short: &str| {
        object
            .get(long)
            .filter(|v| !v.is_null())
            .or_else(|| object.get(short))
            .cloned()
            .unwrap_or(Value::Null)
    };

    let mut normalized = Map::new();
    normalized.insert("source_field".to_string(), pick("source_field", "source"));
    normalized.insert("target_field".to_string(), pick("target_field", "target"));

    for (key, field) in object {
        match key.as_str() {
            "source" | "target" | "source_field" | "target_field" => {}
            "ignore" => {
                if field.as_bool() == Some(true) {
                    normalized.insert(key.clone(), field.clone());
                }
            }
            "expression" | "target_path" => {
                if !field.is_null() {
                    normalized.insert(key.clone(), field.clone());
                }
            }
            _ => {
                normalized.insert(key.clone(), field.clone());
            }
        }
    }

    Value::Object(normalized)
}

/// Apply [`normalize_field_mapping_value`] to every `field_mappings` entry of
/// a serialized extraction result (or of a bare list of records)
pub fn normalize_result_value(value: &Value) -> Value {
    match value {
        Value::Object(object) if object.contains_key("field_mappings") => {
            let mut record = object.clone();
            if let Some(Value::Array(fields)) = object.get("field_mappings") {
                let fields = fields.iter().map(normalize_field_mapping_value).collect();
                record.insert("field_mappings".to_string(), Value::Array(fields));
            }
            Value::Object(record)
        }
        Value::Object(object) => {
            let mut result = object.clone();
            if let Some(mappings) = object.get("mappings") {
                result.insert("mappings".to_string(), normalize_result_value(mappings));
            }
            Value::Object(result)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_result_value).collect()),
        other => other.clone(),
    }
}

/// Content hash identifying a record from a given file
///
/// SHA-256 over sorted-key JSON, so identical source text always yields the
/// same fingerprint.
pub fn mapping_fingerprint(file_path: &str, record: &MappingRecord) -> String {
    let fields = serde_json::to_value(record.field_mappings()).unwrap_or_default();
    let canonical = json!({
        "file": file_path,
        "type": record.kind.as_str(),
        "source_type": record.source_type,
        "target_type": record.target_type,
        "method": record.method_name,
        "interface": record.interface_name,
        "implicit": record.is_implicit(),
        "fields": fields.to_string(),
    });

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MappingArgs;

    fn annotated(method: &str, source: &str, target: &str) -> MapstructHit {
        MapstructHit {
            interface_name: "UserMapper".to_string(),
            method_name: method.to_string(),
            source_type: "User".to_string(),
            target_type: "UserDTO".to_string(),
            binding: MethodBinding::Annotated(MappingArgs {
                source: Some(source.to_string()),
                target: target.to_string(),
                expression: None,
                ignore: false,
            }),
        }
    }

    fn implicit(method: &str) -> MapstructHit {
        MapstructHit {
            binding: MethodBinding::Implicit,
            ..annotated(method, "", "")
        }
    }

    fn pojo_hit(method: &str, source_type: &str) -> PojoHit {
        PojoHit {
            method_name: method.to_string(),
            return_type: "ProductDTO".to_string(),
            source_type: source_type.to_string(),
            source_var: "product".to_string(),
            target_type: "ProductDTO".to_string(),
            target_var: Some("dto".to_string()),
            rule: crate::types::SignatureRule::TypedReturn,
            fields: vec![FieldMapping::direct("name", "name")],
        }
    }

    #[test]
    fn test_annotations_group_per_method() {
        let hits = vec![
            annotated("toDTO", "firstName", "name"),
            annotated("toDTO", "mail", "email"),
            implicit("toSummary"),
            annotated("toDTO", "phone", "phone"),
        ];
        let records = assemble(&hits, &[]);
        assert_eq!(records.len(), 2);

        let targets: Vec<&str> = records[0]
            .field_mappings()
            .iter()
            .map(|f| f.target_field.as_str())
            .collect();
        assert_eq!(targets, vec!["name", "email", "phone"]);
        assert_eq!(records[0].interface_name.as_deref(), Some("UserMapper"));
        assert!(records[1].is_implicit());
        assert_eq!(records[1].method_name.as_deref(), Some("toSummary"));
    }

    #[test]
    fn test_explicit_wins_over_implicit_overload() {
        let records = assemble(&[implicit("toDTO"), annotated("toDTO", "a", "b")], &[]);
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_implicit());
    }

    #[test]
    fn test_mapstruct_before_pojo() {
        let records = assemble(&[implicit("toDTO")], &[pojo_hit("map", "Product")]);
        assert_eq!(records[0].kind, MappingKind::MapStruct);
        assert_eq!(records[1].kind, MappingKind::Pojo);
        assert_eq!(records[1].method_name.as_deref(), Some("map"));
    }

    #[test]
    fn test_pojo_with_empty_type_is_discarded() {
        let records = assemble(&[], &[pojo_hit("map", "")]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_normalize_short_keys() {
        let value = json!({"source": "firstName", "target": "name", "ignore": false, "expression": null});
        let normalized = normalize_field_mapping_value(&value);
        assert_eq!(normalized, json!({"source_field": "firstName", "target_field": "name"}));
    }

    #[test]
    fn test_normalize_keeps_other_keys() {
        let value = json!({
            "source_field": "createdDate",
            "target_field": "notes[].date",
            "target_path": "line.notes[].date",
            "ignore": true,
            "value": "src.getCreatedDate()"
        });
        let normalized = normalize_field_mapping_value(&value);
        assert_eq!(normalized["target_path"], "line.notes[].date");
        assert_eq!(normalized["ignore"], true);
        assert_eq!(normalized["value"], "src.getCreatedDate()");
    }

    #[test]
    fn test_normalize_result_value() {
        let value = json!({
            "file": "A.java",
            "mappings": [
                {"type": "pojo", "field_mappings": [{"source": "a", "target": "b"}]},
                {"type": "mapstruct", "implicit": true, "field_mappings": []}
            ]
        });
        let normalized = normalize_result_value(&value);
        assert_eq!(normalized["file"], "A.java");
        assert_eq!(normalized["mappings"][0]["field_mappings"][0]["source_field"], "a");
        assert_eq!(normalized["mappings"][1]["implicit"], true);
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        let records = assemble(&[annotated("toDTO", "firstName", "name")], &[]);
        let first = mapping_fingerprint("src/UserMapper.java", &records[0]);
        let second = mapping_fingerprint("src/UserMapper.java", &records[0]);
        let other_file = mapping_fingerprint("src/Other.java", &records[0]);

        assert_eq!(first, second);
        assert_ne!(first, other_file);
        assert_eq!(first.len(), 64);
    }
}
