//! MapStruct `@Mapper` interface extraction

use crate::annotation::extract_mapping_annotations;
use crate::scanner::find_block_end;
use crate::signature::{is_reserved, parse_params, Param};
use crate::types::{MapstructHit, MethodBinding};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Source type recorded for annotated methods that declare no source parameter
pub const UNKNOWN_TYPE: &str = "Unknown";

static MAPPER_INTERFACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"@Mapper\b\s*(?:\([^)]*\))?\s*(?:public\s+)?interface\s+(\w+)(?:\s*<[^{]*>)?(?:\s+extends\s+[^{]+)?\s*\{",
    )
    .unwrap()
});

static ABSTRACT_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\w.]+(?:<(?:[^<>;{}]|<[^<>;{}]*>)*>)?(?:\s*\[\])?)\s+(\w+)\s*\(([^)]*)\)\s*;")
        .unwrap()
});

/// Extract raw MapStruct hits: one per `@Mapping` annotation, or one implicit
/// hit for an unannotated method with a source parameter
///
/// Annotations are searched backward from each method over at most
/// `window_lines` lines, and never past the end of the previous method.
pub fn extract_mapstruct_mappings(text: &str, window_lines: usize) -> Vec<MapstructHit> {
    let mut hits = Vec::new();

    for caps in MAPPER_INTERFACE.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let interface_name = name.as_str();
        let open = whole.end() - 1;
        let end = find_block_end(text, open);
        let body = &text[open..end];

        let before = hits.len();
        let mut previous_end = 0;
        for method in ABSTRACT_METHOD.captures_iter(body) {
            let (Some(site), Some(ret), Some(method_name), Some(params)) =
                (method.get(0), method.get(1), method.get(2), method.get(3))
            else {
                continue;
            };
            let return_type = ret.as_str().trim();
            if is_reserved(return_type) || is_reserved(method_name.as_str()) {
                continue;
            }

            let window_start = window_start(body, site.start(), window_lines).max(previous_end);
            let window = &body[window_start..site.start()];
            previous_end = site.end();

            let params = parse_params(params.as_str());
            let source_type = source_param(&params).map(|p| p.ty.clone());
            let target_type = if return_type == "void" {
                params
                    .iter()
                    .find(|p| p.has_annotation("MappingTarget"))
                    .map(|p| p.ty.clone())
                    .unwrap_or_else(|| return_type.to_string())
            } else {
                return_type.to_string()
            };

            let annotations = extract_mapping_annotations(window);
            if !annotations.is_empty() {
                let source_type = source_type.unwrap_or_else(|| UNKNOWN_TYPE.to_string());
                for args in annotations {
                    hits.push(MapstructHit {
                        interface_name: interface_name.to_string(),
                        method_name: method_name.as_str().to_string(),
                        source_type: source_type.clone(),
                        target_type: target_type.clone(),
                        binding: MethodBinding::Annotated(args),
                    });
                }
            } else if let Some(source_type) = source_type {
                hits.push(MapstructHit {
                    interface_name: interface_name.to_string(),
                    method_name: method_name.as_str().to_string(),
                    source_type,
                    target_type,
                    binding: MethodBinding::Implicit,
                });
            } else {
                debug!(
                    "Skipping {}.{}: no annotations and no source parameter",
                    interface_name,
                    method_name.as_str()
                );
            }
        }

        debug!(
            "Mapper interface {}: {} hits",
            interface_name,
            hits.len() - before
        );
    }

    hits
}

/// First parameter that is neither the update target nor a context object
fn source_param(params: &[Param]) -> Option<&Param> {
    params
        .iter()
        .find(|p| !p.has_annotation("MappingTarget") && !p.has_annotation("Context"))
}

/// Offset where the last `lines` lines before `end` begin
fn window_start(text: &str, end: usize, lines: usize) -> usize {
    text[..end]
        .rmatch_indices('\n')
        .nth(lines.saturating_sub(1))
        .map(|(offset, _)| offset + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ANNOTATION_WINDOW_LINES;
    use indoc::indoc;

    fn extract(text: &str) -> Vec<MapstructHit> {
        extract_mapstruct_mappings(text, DEFAULT_ANNOTATION_WINDOW_LINES)
    }

    fn annotated(hit: &MapstructHit) -> &crate::types::MappingArgs {
        match &hit.binding {
            MethodBinding::Annotated(args) => args,
            MethodBinding::Implicit => panic!("expected an annotated hit"),
        }
    }

    #[test]
    fn test_explicit_mapping() {
        let hits = extract(
            r#"@Mapper interface UserMapper { @Mapping(source="firstName", target="name") UserDTO toDTO(User user); }"#,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].interface_name, "UserMapper");
        assert_eq!(hits[0].method_name, "toDTO");
        assert_eq!(hits[0].source_type, "User");
        assert_eq!(hits[0].target_type, "UserDTO");
        assert_eq!(annotated(&hits[0]).source.as_deref(), Some("firstName"));
    }

    #[test]
    fn test_implicit_fallback() {
        let hits = extract("@Mapper public interface OrderMapper { OrderDTO toDto(Order order); }");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].binding, MethodBinding::Implicit);
        assert_eq!(hits[0].source_type, "Order");
    }

    #[test]
    fn test_no_source_type_no_annotation_emits_nothing() {
        let hits = extract("@Mapper interface Factory { OrderDTO create(); }");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_annotations_do_not_leak_into_next_method() {
        let text = indoc! {r#"
            @Mapper
            public interface CarMapper {
                @Mapping(source = "make", target = "manufacturer")
                CarDto carToCarDto(Car car);

                PersonDto personToPersonDto(Person person);
            }
        "#};
        let hits = extract(text);
        assert_eq!(hits.len(), 2);
        assert_eq!(annotated(&hits[0]).target, "manufacturer");
        assert_eq!(hits[1].method_name, "personToPersonDto");
        assert_eq!(hits[1].binding, MethodBinding::Implicit);
    }

    #[test]
    fn test_mapper_with_uses_braces() {
        let text = indoc! {r#"
            @Mapper(componentModel = "spring", uses = {DateMapper.class, MoneyMapper.class})
            public interface InvoiceMapper {
                InvoiceDto toDto(Invoice invoice);
            }
            class After { void unrelated(); }
        "#};
        let hits = extract(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].interface_name, "InvoiceMapper");
    }

    #[test]
    fn test_update_method_targets_mapping_target_param() {
        let text = indoc! {r#"
            @Mapper
            interface CarMapper {
                @Mapping(target = "id", ignore = true)
                void update(CarDto dto, @MappingTarget Car car);
            }
        "#};
        let hits = extract(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_type, "CarDto");
        assert_eq!(hits[0].target_type, "Car");
        assert!(annotated(&hits[0]).ignore);
    }

    #[test]
    fn test_generic_return_type() {
        let hits = extract("@Mapper interface M { List<UserDTO> toDtos(List<User> users); }");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_type, "List<UserDTO>");
        assert_eq!(hits[0].source_type, "List<User>");
    }

    #[test]
    fn test_window_is_bounded_by_lines() {
        let mut text = String::from("@Mapper interface M {\n@Mapping(source = \"a\", target = \"b\")\n");
        for _ in 0..5 {
            text.push_str("// filler\n");
        }
        text.push_str("B map(A a);\n}");

        assert_eq!(extract_mapstruct_mappings(&text, 3)[0].binding, MethodBinding::Implicit);
        assert!(matches!(
            extract_mapstruct_mappings(&text, 10)[0].binding,
            MethodBinding::Annotated(_)
        ));
    }

    #[test]
    fn test_annotated_method_without_params_uses_unknown_source() {
        let text = r#"@Mapper interface M { @Mapping(target = "x", expression = "java(1)") Dto make(); }"#;
        let hits = extract(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_type, UNKNOWN_TYPE);
    }

    #[test]
    fn test_default_method_return_statement_is_not_a_method() {
        let text = indoc! {r#"
            @Mapper
            interface M {
                default Dto wrap(Src s) {
                    return convert(s);
                }
                Dto convert(Src s);
            }
        "#};
        let hits = extract(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].method_name, "convert");
    }

    #[test]
    fn test_truncated_interface() {
        let hits = extract("@Mapper interface Half { UserDTO toDTO(User user);");
        assert_eq!(hits.len(), 1);
    }
}
