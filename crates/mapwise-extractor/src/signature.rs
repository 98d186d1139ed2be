//! Java method signature pieces: parameter lists and reserved words

use crate::scanner::{find_paren_end, split_top_level};

/// Words that can sit where a regex expects `Type name(` but never form a
/// method declaration
const RESERVED: &[&str] = &[
    "assert", "case", "catch", "do", "else", "for", "if", "import", "instanceof", "new",
    "package", "return", "switch", "synchronized", "throw", "try", "while", "yield",
];

/// Whether `word` is a Java statement keyword rather than a type or name
pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// One declared method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Annotation names without the `@` (e.g. `MappingTarget`)
    pub annotations: Vec<String>,

    /// Declared type as written
    pub ty: String,

    /// Parameter name
    pub name: String,
}

impl Param {
    /// Whether the parameter carries the given annotation
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a == name)
    }
}

/// Parse a comma-separated parameter list
///
/// Annotations and `final` are peeled off; the last word is the name and
/// whatever precedes it is the type. Pieces that do not have both are skipped.
pub fn parse_params(list: &str) -> Vec<Param> {
    split_top_level(list, ',')
        .into_iter()
        .filter_map(parse_param)
        .collect()
}

fn parse_param(piece: &str) -> Option<Param> {
    let mut rest = piece.trim();
    let mut annotations = Vec::new();

    loop {
        if let Some(after_at) = rest.strip_prefix('@') {
            let name_len = after_at
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                .unwrap_or(after_at.len());
            annotations.push(after_at[..name_len].to_string());
            rest = after_at[name_len..].trim_start();
            if rest.starts_with('(') {
                let end = find_paren_end(rest, 0);
                rest = rest[end..].trim_start();
            }
        } else if let Some(after_final) = rest.strip_prefix("final ") {
            rest = after_final.trim_start();
        } else {
            break;
        }
    }

    let (ty, name) = rest.rsplit_once(char::is_whitespace)?;
    let ty = ty.trim();
    let name = name.trim();
    if ty.is_empty() || name.is_empty() {
        return None;
    }

    Some(Param {
        annotations,
        ty: ty.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_params() {
        let params = parse_params("Order order, OrderDTO dto");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].ty, "Order");
        assert_eq!(params[0].name, "order");
        assert_eq!(params[1].ty, "OrderDTO");
    }

    #[test]
    fn test_generic_param_type() {
        let params = parse_params("Map<String, List<Item>> items");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].ty, "Map<String, List<Item>>");
        assert_eq!(params[0].name, "items");
    }

    #[test]
    fn test_annotations_and_final() {
        let params = parse_params("final Car car, @MappingTarget CarDto dto, @Context(\"x\") Locale locale");
        assert_eq!(params[0].ty, "Car");
        assert!(params[0].annotations.is_empty());
        assert!(params[1].has_annotation("MappingTarget"));
        assert_eq!(params[1].ty, "CarDto");
        assert!(params[2].has_annotation("Context"));
        assert_eq!(params[2].name, "locale");
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_params("").is_empty());
        assert!(parse_params("justOneWord").is_empty());
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("return"));
        assert!(is_reserved("new"));
        assert!(!is_reserved("UserDTO"));
    }
}
