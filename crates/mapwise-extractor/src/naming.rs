//! Java naming-convention helpers

use once_cell::sync::Lazy;
use regex::Regex;

static CONSTANT_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap());

/// Lowercase the first character and keep the rest untouched
///
/// This is how accessor suffixes become field names: `getFirstName` gives
/// `firstName`. All-caps suffixes keep their tail, so `getUPC` gives `uPC`.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a map key constant to a camelCase field name
///
/// `SPECIAL_INSTRUCTIONS` gives `specialInstructions`; keys without an
/// underscore are lowercased whole.
pub fn constant_to_camel(key: &str) -> String {
    let lowered = key.trim().to_lowercase();
    if !lowered.contains('_') {
        return lowered;
    }

    let mut parts = lowered.split('_');
    let mut camel = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            camel.extend(first.to_uppercase());
            camel.push_str(chars.as_str());
        }
    }
    camel
}

/// Whether a token looks like an ALL_CAPS constant identifier
pub fn is_constant_identifier(token: &str) -> bool {
    CONSTANT_IDENT.is_match(token)
}
